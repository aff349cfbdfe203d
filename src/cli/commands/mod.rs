//! Command implementations for smart-todo.
//!
//! Every command returns the text to print; the binary decides where it
//! goes.

mod add;
mod shell;
mod stats;
mod tasks;

pub use add::add;
pub use shell::completions;
pub use stats::stats;
pub use tasks::{
    backup, clear, complete, delete, filter_from_args, incomplete, list, restore, search, show,
    update, update_from_args,
};

use std::io;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{Commands, OutputFormat};
use crate::core::Clock;
use crate::error::TodoError;
use crate::features::interactive::Repl;
use crate::output::{format_parse_error, format_parse_error_pretty};
use crate::tasks::TaskService;

/// Run the interactive session on the process's stdin and stdout.
///
/// # Errors
///
/// Returns an I/O error if the terminal cannot be read or written.
pub fn repl<C: Clock>(service: &mut TaskService<C>) -> Result<String, TodoError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Repl::new(stdin.lock(), stdout.lock(), service).run()?;
    Ok(String::new())
}

/// Dispatch a parsed command. `None` starts the interactive session.
///
/// # Errors
///
/// Returns whatever the command handler returns.
pub fn execute<C: Clock>(
    service: &mut TaskService<C>,
    command: Option<Commands>,
    format: OutputFormat,
) -> Result<String, TodoError> {
    match command {
        Some(Commands::Add(args)) => add(service, &args, format),
        Some(Commands::List(args)) => list(service, &args, format),
        Some(Commands::Show { id }) => show(service, &id, format),
        Some(Commands::Search { keyword }) => search(service, &keyword.join(" "), format),
        Some(Commands::Complete { id }) => complete(service, &id, format),
        Some(Commands::Incomplete { id }) => incomplete(service, &id, format),
        Some(Commands::Delete { id }) => delete(service, &id, format),
        Some(Commands::Update(args)) => update(service, &args, format),
        Some(Commands::Clear { all }) => clear(service, all, format),
        Some(Commands::Stats) => stats(service, format),
        Some(Commands::Backup { path }) => backup(service, path.as_deref(), format),
        Some(Commands::Restore { path }) => restore(service, &path, format),
        Some(Commands::Completions { shell, install }) => completions(&shell, install),
        Some(Commands::Repl) | None => repl(service),
    }
}

/// Render an error for stderr in the requested format.
///
/// Parse failures list every reason; other errors are a single line.
#[must_use]
pub fn render_error(err: &TodoError, format: OutputFormat) -> String {
    match (err, format) {
        (TodoError::Parse(parse), OutputFormat::Json) => {
            format_parse_error(parse, format).unwrap_or_else(|_| err.to_string())
        }
        (TodoError::Parse(parse), OutputFormat::Pretty) => {
            format!("{}: {}", "error".red().bold(), format_parse_error_pretty(parse))
        }
        (_, OutputFormat::Json) => serde_json::to_string_pretty(&json!({
            "error": err.code(),
            "message": err.to_string(),
        }))
        .unwrap_or_else(|_| err.to_string()),
        (_, OutputFormat::Pretty) => format!("{}: {err}", "error".red().bold()),
    }
}
