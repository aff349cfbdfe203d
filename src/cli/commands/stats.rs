//! Statistics command implementation.

use crate::cli::args::OutputFormat;
use crate::core::Clock;
use crate::error::TodoError;
use crate::features::stats::TaskStats;
use crate::output::format_stats;
use crate::tasks::TaskService;

/// Execute the stats command.
///
/// # Errors
///
/// Returns `TodoError::Json` if JSON serialization fails.
pub fn stats<C: Clock>(service: &TaskService<C>, format: OutputFormat) -> Result<String, TodoError> {
    let stats = TaskStats::calculate(service.list(), service.today());
    format_stats(&stats, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::core::FixedClock;
    use crate::storage::JsonStore;

    #[test]
    fn test_stats_json() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("tasks.json"));
        let today = NaiveDate::from_ymd_opt(2025, 10, 17).unwrap();
        let mut service = TaskService::open(store, FixedClock::at_date(today)).unwrap();
        let done = service.add_from_text("Old report due:yesterday #high").unwrap();
        service.add_from_text("Taxes due:yesterday").unwrap();
        service.complete(&done.id).unwrap();

        let output = stats(&service, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["complete"], 1);
        assert_eq!(value["overdue"], 1);
        assert_eq!(value["by_priority"]["high"], 1);
        assert_eq!(value["completion_rate"], 0.5);
    }

    #[test]
    fn test_stats_empty_list() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("tasks.json"));
        let service = TaskService::open(store, FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 10, 17).unwrap())).unwrap();

        let output = stats(&service, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 0);
        assert!(value["completion_rate"].is_null());
    }
}
