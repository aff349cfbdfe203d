//! Output formatting for smart-todo.
//!
//! This module provides formatters for displaying tasks in various formats.

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::error::TodoError;
use crate::features::nlp::{ParseError, ParsedTask};
use crate::features::stats::TaskStats;
use crate::tasks::Task;

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[&Task],
    title: &str,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, TodoError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title, today)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn format_task(task: &Task, today: NaiveDate, format: OutputFormat) -> Result<String, TodoError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task, today)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format parser output based on output format
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn format_parsed(parsed: &ParsedTask, format: OutputFormat) -> Result<String, TodoError> {
    match format {
        OutputFormat::Pretty => Ok(format_parsed_pretty(parsed)),
        OutputFormat::Json => to_json(parsed),
    }
}

/// Format a parse failure based on output format
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn format_parse_error(err: &ParseError, format: OutputFormat) -> Result<String, TodoError> {
    match format {
        OutputFormat::Pretty => Ok(format_parse_error_pretty(err)),
        OutputFormat::Json => format_parse_error_json(err),
    }
}

/// Format statistics based on output format
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn format_stats(stats: &TaskStats, format: OutputFormat) -> Result<String, TodoError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => to_json(stats),
    }
}
