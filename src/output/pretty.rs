use chrono::NaiveDate;
use colored::Colorize;

use crate::core::Priority;
use crate::features::nlp::{ParseError, ParsedTask};
use crate::features::stats::{render_bar_chart, render_progress_bar, TaskStats};
use crate::tasks::{Task, TaskStatus};

fn status_icon(status: TaskStatus) -> colored::ColoredString {
    match status {
        TaskStatus::Incomplete => "[ ]".white(),
        TaskStatus::Complete => "[x]".green(),
    }
}

fn priority_label(priority: Priority) -> colored::ColoredString {
    let label = format!("!{priority}");
    match priority {
        Priority::High => label.red().bold(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.blue(),
    }
}

fn due_label(task: &Task) -> Option<String> {
    match (task.due_date, task.due_time) {
        (Some(date), Some(time)) => Some(format!("{date} {}", time.format("%H:%M"))),
        (Some(date), None) => Some(date.to_string()),
        (None, Some(time)) => Some(format!("at {}", time.format("%H:%M"))),
        (None, None) => None,
    }
}

/// One-line summary of a task
pub fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let description = if task.is_complete() {
        task.description.dimmed().to_string()
    } else {
        task.description.bold().to_string()
    };

    let mut line = format!(
        "{} {}  {}",
        status_icon(task.status),
        task.short_id().dimmed(),
        description
    );

    if let Some(priority) = task.priority {
        line.push_str(&format!("  {}", priority_label(priority)));
    }

    if let Some(due) = due_label(task) {
        if task.is_overdue(today) {
            line.push_str(&format!("  {}", format!("due {due} (overdue)").red()));
        } else {
            line.push_str(&format!("  {}", format!("due {due}").yellow()));
        }
    }

    if !task.tags.is_empty() {
        let tags_str = task
            .tags
            .iter()
            .map(|t| format!("@{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        line.push_str(&format!("  {}", tags_str.cyan()));
    }

    if let Some(assignee) = &task.assigned_to {
        line.push_str(&format!("  {}", format!("→ {assignee}").magenta()));
    }

    if let Some(duration) = task.duration {
        line.push_str(&format!("  {}", format!("({duration})").dimmed()));
    }

    line
}

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[&Task], title: &str, today: NaiveDate) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 tasks)\n  No tasks");
    }

    let mut output = format!("{title} ({} tasks)\n", tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        output.push_str(&format_task_line(task, today));
        output.push('\n');
    }

    output
}

/// Format a single task with every field
pub fn format_task_pretty(task: &Task, today: NaiveDate) -> String {
    let mut output = format!("{} {}\n", status_icon(task.status), task.description.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Status".dimmed(), task.status));

    if let Some(priority) = task.priority {
        output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), priority_label(priority)));
    }

    if let Some(due) = due_label(task) {
        let due = if task.is_overdue(today) {
            format!("{due} (overdue)").red().to_string()
        } else {
            due
        };
        output.push_str(&format!("  {}: {}\n", "Due".dimmed(), due));
    }

    if !task.tags.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Tags".dimmed(), task.tags.join(", ")));
    }

    if let Some(assignee) = &task.assigned_to {
        output.push_str(&format!("  {}: {}\n", "Assigned".dimmed(), assignee));
    }

    if let Some(duration) = task.duration {
        output.push_str(&format!("  {}: {}\n", "Duration".dimmed(), duration));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        task.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Updated".dimmed(),
        task.updated_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

/// Format parser output without storing it
pub fn format_parsed_pretty(parsed: &ParsedTask) -> String {
    let none = || "-".dimmed().to_string();

    let mut output = format!("{}\n", "Parsed task".bold());
    output.push_str(&format!("  {}: {}\n", "Description".dimmed(), parsed.description));
    output.push_str(&format!(
        "  {}: {}\n",
        "Tags".dimmed(),
        if parsed.tags.is_empty() {
            none()
        } else {
            parsed.tags.join(", ")
        }
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Priority".dimmed(),
        parsed.priority.map_or_else(none, |p| p.to_string())
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Due date".dimmed(),
        parsed.due_date.map_or_else(none, |d| d.to_string())
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Due time".dimmed(),
        parsed
            .due_time
            .map_or_else(none, |t| t.format("%H:%M").to_string())
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Assigned".dimmed(),
        parsed.assignee_email.clone().unwrap_or_else(none)
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Duration".dimmed(),
        parsed.duration.map_or_else(none, |d| d.to_string())
    ));

    output
}

/// Format a parse failure with one line per reason
pub fn format_parse_error_pretty(err: &ParseError) -> String {
    let mut output = format!("{} {}", "✗".red(), err.kind().to_string().red().bold());
    for detail in err.details() {
        output.push_str(&format!("\n  • {detail}"));
    }
    output
}

/// Format statistics with small charts
pub fn format_stats_pretty(stats: &TaskStats) -> String {
    let mut output = format!("{}\n", "Task statistics".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    output.push_str(&format!("  {:<12} {}\n", "Total", stats.total));
    output.push_str(&format!(
        "  {:<12} {}\n",
        "Complete",
        stats.complete.to_string().green()
    ));
    output.push_str(&format!("  {:<12} {}\n", "Incomplete", stats.incomplete));
    if stats.overdue > 0 {
        output.push_str(&format!(
            "  {:<12} {}\n",
            "Overdue",
            stats.overdue.to_string().red().bold()
        ));
    } else {
        output.push_str(&format!("  {:<12} 0\n", "Overdue"));
    }
    output.push_str(&format!("  {:<12} {}\n", "Due today", stats.due_today));

    if stats.completion_rate.is_some() {
        let percent = stats.completion_percent();
        output.push_str(&format!(
            "  {:<12} {} {percent}%\n",
            "Completion",
            render_progress_bar(percent, 20).green()
        ));
    }

    if stats.total > 0 {
        output.push_str(&format!("\n{}\n", "By priority".bold()));
        let rows = vec![
            ("high".to_string(), stats.by_priority.high),
            ("medium".to_string(), stats.by_priority.medium),
            ("low".to_string(), stats.by_priority.low),
            ("none".to_string(), stats.by_priority.none),
        ];
        output.push_str(&render_bar_chart(&rows, 8, 20));
        output.push('\n');
    }

    if !stats.by_tag.is_empty() {
        output.push_str(&format!("\n{}\n", "By tag".bold()));
        let rows: Vec<(String, usize)> = stats
            .by_tag
            .iter()
            .map(|(tag, count)| (format!("@{tag}"), *count))
            .collect();
        output.push_str(&render_bar_chart(&rows, 16, 20));
        output.push('\n');
    }

    output
}
