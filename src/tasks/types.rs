//! Persisted task records.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{Priority, TaskDuration};
use crate::features::nlp::ParsedTask;

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Still to do.
    #[default]
    Incomplete,
    /// Done.
    Complete,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incomplete => write!(f, "incomplete"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_time: Option<NaiveTime>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub duration: Option<TaskDuration>,
    #[serde(default)]
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changes to apply to an existing task. `None` and empty lists leave the
/// field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub assigned_to: Option<String>,
    pub duration: Option<TaskDuration>,
}

impl TaskUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Task {
    /// Create an incomplete task with a fresh id.
    #[must_use]
    pub fn new(description: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            tags: Vec::new(),
            priority: None,
            due_date: None,
            due_time: None,
            assigned_to: None,
            duration: None,
            status: TaskStatus::Incomplete,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a task from parser output.
    #[must_use]
    pub fn from_parsed(parsed: ParsedTask, now: DateTime<Utc>) -> Self {
        Self {
            tags: parsed.tags,
            priority: parsed.priority,
            due_date: parsed.due_date,
            due_time: parsed.due_time,
            assigned_to: parsed.assignee_email,
            duration: parsed.duration,
            ..Self::new(parsed.description, now)
        }
    }

    /// Mark as complete. Returns `false` if it already was.
    pub fn mark_complete(&mut self, now: DateTime<Utc>) -> bool {
        self.set_status(TaskStatus::Complete, now)
    }

    /// Mark as incomplete. Returns `false` if it already was.
    pub fn mark_incomplete(&mut self, now: DateTime<Utc>) -> bool {
        self.set_status(TaskStatus::Incomplete, now)
    }

    fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.updated_at = now;
        true
    }

    /// Add a tag (lowercased). Returns `false` if it was already present.
    pub fn add_tag(&mut self, tag: &str, now: DateTime<Utc>) -> bool {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        self.updated_at = now;
        true
    }

    /// Remove a tag, ignoring case. Returns `false` if it was absent.
    pub fn remove_tag(&mut self, tag: &str, now: DateTime<Utc>) -> bool {
        let tag = tag.trim().to_lowercase();
        let before = self.tags.len();
        self.tags.retain(|t| *t != tag);
        if self.tags.len() == before {
            return false;
        }
        self.updated_at = now;
        true
    }

    pub fn set_priority(&mut self, priority: Option<Priority>, now: DateTime<Utc>) {
        if self.priority != priority {
            self.priority = priority;
            self.updated_at = now;
        }
    }

    /// Apply an already validated update. Returns whether anything changed.
    pub(crate) fn apply(&mut self, update: TaskUpdate, now: DateTime<Utc>) -> bool {
        let mut changed = false;

        if let Some(description) = update.description {
            if description != self.description {
                self.description = description;
                changed = true;
            }
        }
        if let Some(priority) = update.priority {
            if self.priority != Some(priority) {
                self.priority = Some(priority);
                changed = true;
            }
        }
        for tag in &update.add_tags {
            changed |= self.add_tag(tag, now);
        }
        for tag in &update.remove_tags {
            changed |= self.remove_tag(tag, now);
        }
        if update.due_date.is_some() && update.due_date != self.due_date {
            self.due_date = update.due_date;
            changed = true;
        }
        if update.due_time.is_some() && update.due_time != self.due_time {
            self.due_time = update.due_time;
            changed = true;
        }
        if update.assigned_to.is_some() && update.assigned_to != self.assigned_to {
            self.assigned_to = update.assigned_to;
            changed = true;
        }
        if update.duration.is_some() && update.duration != self.duration {
            self.duration = update.duration;
            changed = true;
        }

        if changed {
            self.updated_at = now;
        }
        changed
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Complete
    }

    /// Due before `today` and not yet done.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_complete() && self.due_date.is_some_and(|due| due < today)
    }

    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        self.priority == Some(Priority::High)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// First 8 characters of the id.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::features::nlp::parse_task;

    fn now() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2025, 10, 17)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Buy milk", now());
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.status, TaskStatus::Incomplete);
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(task.id.len(), 36);
        assert_eq!(task.short_id().len(), 8);
        assert!(task.id.starts_with(task.short_id()));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Task::new("a", now()).id, Task::new("a", now()).id);
    }

    #[test]
    fn test_from_parsed() {
        let parsed = parse_task(
            "Ship it @work #high due:tomorrow at 5pm 2h assigned:bob@example.com",
            date(2025, 10, 17),
        )
        .unwrap();
        let task = Task::from_parsed(parsed, now());

        assert_eq!(task.description, "Ship it");
        assert_eq!(task.tags, vec!["work"]);
        assert!(task.is_high_priority());
        assert_eq!(task.due_date, Some(date(2025, 10, 18)));
        assert_eq!(task.due_time, NaiveTime::from_hms_opt(17, 0, 0));
        assert_eq!(task.assigned_to.as_deref(), Some("bob@example.com"));
        assert_eq!(task.duration.map(|d| d.total_minutes()), Some(120));
    }

    #[test]
    fn test_status_transitions() {
        let mut task = Task::new("x", now());
        let later = now() + Duration::minutes(5);

        assert!(task.mark_complete(later));
        assert!(task.is_complete());
        assert_eq!(task.updated_at, later);

        assert!(!task.mark_complete(later + Duration::minutes(1)));
        assert_eq!(task.updated_at, later);

        assert!(task.mark_incomplete(later));
        assert!(!task.is_complete());
    }

    #[test]
    fn test_tags() {
        let mut task = Task::new("x", now());
        assert!(task.add_tag("Work", now()));
        assert!(!task.add_tag("work", now()));
        assert!(!task.add_tag("  ", now()));
        assert!(task.has_tag("WORK"));
        assert!(task.remove_tag("WORK", now()));
        assert!(!task.remove_tag("work", now()));
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_is_overdue() {
        let mut task = Task::new("x", now());
        assert!(!task.is_overdue(date(2025, 10, 17)));

        task.due_date = Some(date(2025, 10, 16));
        assert!(task.is_overdue(date(2025, 10, 17)));
        assert!(!task.is_overdue(date(2025, 10, 16)));

        task.mark_complete(now());
        assert!(!task.is_overdue(date(2025, 10, 17)));
    }

    #[test]
    fn test_apply_update() {
        let mut task = Task::new("old", now());
        let later = now() + Duration::hours(1);
        let changed = task.apply(
            TaskUpdate {
                description: Some("new".to_string()),
                priority: Some(Priority::Low),
                add_tags: vec!["a".to_string()],
                ..TaskUpdate::default()
            },
            later,
        );
        assert!(changed);
        assert_eq!(task.description, "new");
        assert_eq!(task.priority, Some(Priority::Low));
        assert_eq!(task.tags, vec!["a"]);
        assert_eq!(task.updated_at, later);

        assert!(!task.apply(TaskUpdate::default(), later + Duration::hours(1)));
        assert_eq!(task.updated_at, later);
    }

    #[test]
    fn test_serde_shape() {
        let mut task = Task::new("x", now());
        task.priority = Some(Priority::Medium);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "incomplete");
        assert_eq!(json["priority"], "medium");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{
            "id": "abc",
            "description": "legacy",
            "created_at": "2025-10-17T09:00:00Z",
            "updated_at": "2025-10-17T09:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Incomplete);
        assert!(task.tags.is_empty());
        assert_eq!(task.short_id(), "abc");
    }
}
