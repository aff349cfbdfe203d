//! Configuration management for smart-todo.
//!
//! This module handles loading configuration from `~/.smart-todo/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, LoggingConfig, StorageConfig};
