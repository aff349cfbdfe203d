//! Summary statistics over a task list.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::Priority;
use crate::tasks::TodoList;

/// Counts for one priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Tasks with no priority set.
    pub none: usize,
}

/// Snapshot of a task list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStats {
    /// Total tasks
    pub total: usize,
    /// Completed tasks
    pub complete: usize,
    /// Tasks still to do
    pub incomplete: usize,
    /// Incomplete tasks whose due date has passed
    pub overdue: usize,
    /// Incomplete tasks due today
    pub due_today: usize,
    /// Tasks per priority level
    pub by_priority: PriorityCounts,
    /// Tasks per tag, sorted by tag name
    pub by_tag: BTreeMap<String, usize>,
    /// Completed / total; `None` for an empty list
    pub completion_rate: Option<f64>,
}

impl TaskStats {
    /// Calculate statistics for `list` as of `today`.
    #[must_use]
    pub fn calculate(list: &TodoList, today: NaiveDate) -> Self {
        let mut by_priority = PriorityCounts::default();
        let mut by_tag: BTreeMap<String, usize> = BTreeMap::new();
        let mut overdue = 0;
        let mut due_today = 0;

        for task in list.iter() {
            match task.priority {
                Some(Priority::High) => by_priority.high += 1,
                Some(Priority::Medium) => by_priority.medium += 1,
                Some(Priority::Low) => by_priority.low += 1,
                None => by_priority.none += 1,
            }
            for tag in &task.tags {
                *by_tag.entry(tag.clone()).or_default() += 1;
            }
            if task.is_overdue(today) {
                overdue += 1;
            }
            if !task.is_complete() && task.due_date == Some(today) {
                due_today += 1;
            }
        }

        let total = list.len();
        let complete = list.count_complete();

        #[allow(clippy::cast_precision_loss)]
        let completion_rate = (total > 0).then(|| complete as f64 / total as f64);

        Self {
            total,
            complete,
            incomplete: total - complete,
            overdue,
            due_today,
            by_priority,
            by_tag,
            completion_rate,
        }
    }

    /// Completion rate as a whole percentage, 0 for an empty list.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn completion_percent(&self) -> u8 {
        self.completion_rate
            .map_or(0, |rate| (rate * 100.0).round().clamp(0.0, 100.0) as u8)
    }
}
