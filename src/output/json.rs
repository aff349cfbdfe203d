//! JSON output formatting for smart-todo.

use serde::Serialize;
use serde_json::json;

use crate::error::TodoError;
use crate::features::nlp::ParseError;
use crate::tasks::Task;

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[&Task], list_name: &str) -> Result<String, TodoError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a parse failure as JSON
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn format_parse_error_json(err: &ParseError) -> Result<String, TodoError> {
    let output = json!({
        "error": err.kind().to_string(),
        "message": err.to_string(),
        "details": err.details()
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, TodoError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    use crate::features::nlp::parse_task;

    #[test]
    fn test_format_tasks_json() {
        let task = Task::new("Buy milk", Utc::now());
        let output = format_tasks_json(&[&task], "Tasks").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["list"], "Tasks");
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["description"], "Buy milk");
        assert_eq!(value["items"][0]["status"], "incomplete");
    }

    #[test]
    fn test_format_tasks_json_empty() {
        let output = format_tasks_json(&[], "Empty").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 0);
        assert!(value["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_format_parse_error_json() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 17).unwrap();
        let err = parse_task("Party due:someday", today).unwrap_err();
        let output = format_parse_error_json(&err).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["error"], "invalid_due_date");
        assert_eq!(value["details"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_to_json() {
        let value = json!({"key": "value"});
        let output = to_json(&value).unwrap();
        assert!(output.contains("\"key\""));
    }
}
