//! Shell integration features.
//!
//! Currently shell completion scripts and their install instructions.

pub mod completions;

pub use completions::{completion_install_instructions, generate_completions, shell_from_str};
