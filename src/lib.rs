//! smart-todo - a command-line task manager with natural language entry
//!
//! Free-form task text such as `"Call mom due:tomorrow at 3pm @family"` is
//! parsed into a structured task, validated and stored in a JSON file.
//! The parser lives in [`features::nlp`]; the task model, collection and
//! service in [`tasks`].

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tasks;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::TodoError;
pub use features::nlp::{parse_task, ParseError, ParsedTask};
pub use tasks::{Task, TaskService, TodoList};
