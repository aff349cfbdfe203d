//! Task management commands: list, show, search, state changes, update,
//! clear, backup and restore.

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{ListArgs, OutputFormat, UpdateArgs};
use crate::core::{resolve_date, Clock};
use crate::error::TodoError;
use crate::output::{format_task, format_task_line, format_tasks};
use crate::tasks::{StatusFilter, Task, TaskFilter, TaskService, TaskUpdate};

fn list_title(args: &ListArgs) -> String {
    let mut title = match args.status {
        StatusFilter::All => "Tasks".to_string(),
        StatusFilter::Incomplete => "Incomplete tasks".to_string(),
        StatusFilter::Complete => "Completed tasks".to_string(),
    };
    if args.overdue {
        title.push_str(" (overdue)");
    }
    if let Some(priority) = args.priority {
        title.push_str(&format!(" #{priority}"));
    }
    if let Some(tag) = &args.tag {
        title.push_str(&format!(" @{}", tag.to_lowercase()));
    }
    title
}

/// Translate list flags into a [`TaskFilter`].
#[must_use]
pub fn filter_from_args(args: &ListArgs) -> TaskFilter {
    let mut filter = TaskFilter::default().with_status(args.status);
    if let Some(tag) = &args.tag {
        filter = filter.with_tag(tag.clone());
    }
    if let Some(priority) = args.priority {
        filter = filter.with_priority(priority);
    }
    if args.overdue {
        filter = filter.overdue_only();
    }
    filter
}

/// Execute the list command.
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn list<C: Clock>(
    service: &TaskService<C>,
    args: &ListArgs,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let today = service.today();
    let tasks = service.list().list(&filter_from_args(args), today);
    format_tasks(&tasks, &list_title(args), today, format)
}

/// Execute the show command.
///
/// # Errors
///
/// Returns `NotFound` or `AmbiguousId` if the id does not resolve.
pub fn show<C: Clock>(
    service: &TaskService<C>,
    id: &str,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let task = service.find(id)?;
    format_task(task, service.today(), format)
}

/// Execute the search command.
///
/// # Errors
///
/// Returns `InvalidInput` for a blank keyword.
pub fn search<C: Clock>(
    service: &TaskService<C>,
    keyword: &str,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(TodoError::InvalidInput(
            "search keyword must not be empty".to_string(),
        ));
    }
    let tasks = service.list().search(keyword);
    format_tasks(&tasks, &format!("Search: {keyword}"), service.today(), format)
}

fn action_result<C: Clock>(
    service: &TaskService<C>,
    action: &str,
    task: &Task,
    format: OutputFormat,
) -> Result<String, TodoError> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "action": action.to_lowercase(),
                "task": task,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            format!("{action}:").green().bold(),
            format_task_line(task, service.today())
        )),
    }
}

/// Execute the complete command.
///
/// # Errors
///
/// Lookup and storage errors.
pub fn complete<C: Clock>(
    service: &mut TaskService<C>,
    id: &str,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let task = service.complete(id)?;
    action_result(service, "Completed", &task, format)
}

/// Execute the incomplete command.
///
/// # Errors
///
/// Lookup and storage errors.
pub fn incomplete<C: Clock>(
    service: &mut TaskService<C>,
    id: &str,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let task = service.incomplete(id)?;
    action_result(service, "Reopened", &task, format)
}

/// Execute the delete command.
///
/// # Errors
///
/// Lookup and storage errors.
pub fn delete<C: Clock>(
    service: &mut TaskService<C>,
    id: &str,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let task = service.delete(id)?;
    action_result(service, "Deleted", &task, format)
}

/// Build a [`TaskUpdate`] from update flags, resolving `--due` against
/// `service.today()`.
///
/// # Errors
///
/// Returns `InvalidInput` if the due expression cannot be resolved or no
/// change was requested.
pub fn update_from_args<C: Clock>(
    service: &TaskService<C>,
    args: &UpdateArgs,
) -> Result<TaskUpdate, TodoError> {
    let due_date = args
        .due
        .as_deref()
        .map(|expr| {
            resolve_date(expr, service.today())
                .map_err(|e| TodoError::InvalidInput(format!("invalid due date: {e}")))
        })
        .transpose()?;

    let update = TaskUpdate {
        description: args.description.clone(),
        priority: args.priority,
        add_tags: args.add_tags.clone(),
        remove_tags: args.remove_tags.clone(),
        due_date,
        assigned_to: args.assign.clone(),
        ..TaskUpdate::default()
    };

    if update.is_empty() {
        return Err(TodoError::InvalidInput(
            "nothing to update; pass at least one field flag".to_string(),
        ));
    }
    Ok(update)
}

/// Execute the update command.
///
/// # Errors
///
/// `InvalidInput` for rejected values, lookup and storage errors.
pub fn update<C: Clock>(
    service: &mut TaskService<C>,
    args: &UpdateArgs,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let update = update_from_args(service, args)?;
    let task = service.update(&args.id, update)?;
    action_result(service, "Updated", &task, format)
}

/// Execute the clear command.
///
/// # Errors
///
/// Backup and storage errors.
pub fn clear<C: Clock>(
    service: &mut TaskService<C>,
    all: bool,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let removed = if all {
        service.clear_all()?
    } else {
        service.clear_complete()?
    };

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "removed": removed,
            "remaining": service.list().len(),
        }))?),
        OutputFormat::Pretty => {
            let what = if all { "task(s)" } else { "completed task(s)" };
            Ok(format!("{} {removed} {what}", "Cleared".green().bold()))
        }
    }
}

/// Execute the backup command.
///
/// # Errors
///
/// `NotFound` if there is no task file yet, I/O errors otherwise.
pub fn backup<C: Clock>(
    service: &TaskService<C>,
    path: Option<&Path>,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let dest = service.backup(path)?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "backup": dest.display().to_string(),
            "tasks": service.list().len(),
        }))?),
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            "Backed up to".green().bold(),
            dest.display()
        )),
    }
}

/// Execute the restore command.
///
/// # Errors
///
/// `NotFound` or `Storage` if the backup is missing or invalid.
pub fn restore<C: Clock>(
    service: &mut TaskService<C>,
    path: &Path,
    format: OutputFormat,
) -> Result<String, TodoError> {
    let count = service.restore(path)?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "restored": path.display().to_string(),
            "tasks": count,
        }))?),
        OutputFormat::Pretty => Ok(format!(
            "{} {count} task(s) from {}",
            "Restored".green().bold(),
            path.display()
        )),
    }
}
