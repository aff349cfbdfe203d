//! Add command implementation.
//!
//! This module implements `todo add` for natural language task entry.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{AddArgs, OutputFormat};
use crate::core::Clock;
use crate::error::TodoError;
use crate::features::nlp::parse_task;
use crate::output::{format_parsed, format_task_line};
use crate::tasks::TaskService;

/// Execute the add command.
///
/// With `--parse-only` the text is parsed and shown but nothing is stored.
///
/// # Errors
///
/// Returns `TodoError::Parse` if the text is rejected, or a storage error if
/// the task cannot be saved.
pub fn add<C: Clock>(
    service: &mut TaskService<C>,
    args: &AddArgs,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let text = args.joined();
    let reference = args.today.unwrap_or_else(|| service.today());

    if args.parse_only {
        let parsed = parse_task(&text, reference)?;
        return format_parsed(&parsed, format);
    }

    let task = service.add_from_text_at(&text, reference)?;

    match format {
        OutputFormat::Json => {
            let output = json!({
                "created": true,
                "task": task,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            "Created:".green().bold(),
            format_task_line(&task, service.today())
        )),
    }
}
