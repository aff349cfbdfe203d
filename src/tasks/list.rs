//! The in-memory task collection.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::Priority;
use crate::error::TodoError;
use crate::features::nlp::{validate_email, validate_tag};

use super::types::{Task, TaskUpdate};

/// Which completion states to include when listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Only tasks still to do.
    Incomplete,
    /// Only finished tasks.
    Complete,
}

/// Criteria for [`TodoList::list`]. All set criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: StatusFilter,
    /// Tag name, case-insensitive.
    pub tag: Option<String>,
    pub priority: Option<Priority>,
    /// Only tasks overdue relative to the listing date.
    pub overdue: bool,
}

impl TaskFilter {
    #[must_use]
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn overdue_only(mut self) -> Self {
        self.overdue = true;
        self
    }

    /// Check a single task against every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Incomplete => !task.is_complete(),
            StatusFilter::Complete => task.is_complete(),
        };

        status_ok
            && self.tag.as_deref().map_or(true, |tag| task.has_tag(tag))
            && self.priority.map_or(true, |p| task.priority == Some(p))
            && (!self.overdue || task.is_overdue(today))
    }
}

/// Tasks keyed by id.
///
/// Serialized as `{"tasks": {"<id>": {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(default)]
    tasks: BTreeMap<String, Task>,
}

impl TodoList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task, returning its id.
    pub fn add(&mut self, task: Task) -> String {
        let id = task.id.clone();
        self.tasks.insert(id.clone(), task);
        id
    }

    /// Look up a task by its full id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Resolve a full id or a unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing matches and `AmbiguousId` if the prefix
    /// is shared by several tasks.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Task, TodoError> {
        let prefix = prefix.trim();
        if let Some(task) = self.tasks.get(prefix) {
            return Ok(task);
        }
        if prefix.is_empty() {
            return Err(TodoError::NotFound(String::new()));
        }

        let mut matches = self
            .tasks
            .range(prefix.to_string()..)
            .take_while(|(id, _)| id.starts_with(prefix))
            .map(|(_, task)| task);

        match (matches.next(), matches.count()) {
            (None, _) => Err(TodoError::NotFound(prefix.to_string())),
            (Some(task), 0) => Ok(task),
            (Some(_), rest) => Err(TodoError::AmbiguousId {
                prefix: prefix.to_string(),
                count: rest + 1,
            }),
        }
    }

    fn find_mut(&mut self, prefix: &str) -> Result<&mut Task, TodoError> {
        let id = self.find_by_prefix(prefix)?.id.clone();
        self.tasks
            .get_mut(&id)
            .ok_or(TodoError::NotFound(id))
    }

    /// Apply `update` to the task matching `prefix`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty description, a malformed tag or
    /// a malformed assignee email, and lookup errors as in
    /// [`find_by_prefix`](Self::find_by_prefix).
    pub fn update(
        &mut self,
        prefix: &str,
        mut update: TaskUpdate,
        now: DateTime<Utc>,
    ) -> Result<&Task, TodoError> {
        if let Some(description) = update.description.as_mut() {
            *description = description.trim().to_string();
            if description.is_empty() {
                return Err(TodoError::InvalidInput(
                    "task description cannot be empty".to_string(),
                ));
            }
        }
        for tag in &update.add_tags {
            let outcome = validate_tag(tag.trim());
            if !outcome.is_valid() {
                return Err(TodoError::InvalidInput(outcome.into_reasons().join("; ")));
            }
        }
        if let Some(email) = update.assigned_to.as_mut() {
            let outcome = validate_email(email);
            if !outcome.is_valid() {
                return Err(TodoError::InvalidInput(outcome.into_reasons().join("; ")));
            }
            *email = email.to_lowercase();
        }

        let task = self.find_mut(prefix)?;
        task.apply(update, now);
        Ok(&*task)
    }

    /// Remove and return the task matching `prefix`.
    ///
    /// # Errors
    ///
    /// Lookup errors as in [`find_by_prefix`](Self::find_by_prefix).
    pub fn delete(&mut self, prefix: &str) -> Result<Task, TodoError> {
        let id = self.find_by_prefix(prefix)?.id.clone();
        self.tasks.remove(&id).ok_or(TodoError::NotFound(id))
    }

    /// # Errors
    ///
    /// Lookup errors as in [`find_by_prefix`](Self::find_by_prefix).
    pub fn mark_complete(&mut self, prefix: &str, now: DateTime<Utc>) -> Result<&Task, TodoError> {
        let task = self.find_mut(prefix)?;
        task.mark_complete(now);
        Ok(&*task)
    }

    /// # Errors
    ///
    /// Lookup errors as in [`find_by_prefix`](Self::find_by_prefix).
    pub fn mark_incomplete(
        &mut self,
        prefix: &str,
        now: DateTime<Utc>,
    ) -> Result<&Task, TodoError> {
        let task = self.find_mut(prefix)?;
        task.mark_incomplete(now);
        Ok(&*task)
    }

    /// Tasks matching `filter`, oldest first.
    #[must_use]
    pub fn list(&self, filter: &TaskFilter, today: NaiveDate) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|task| filter.matches(task, today))
            .collect();
        sort_by_creation(&mut tasks);
        tasks
    }

    /// Tasks whose description contains `keyword`, ignoring case.
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<&Task> {
        let needle = keyword.trim().to_lowercase();
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|task| task.description.to_lowercase().contains(&needle))
            .collect();
        sort_by_creation(&mut tasks);
        tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn count_complete(&self) -> usize {
        self.tasks.values().filter(|t| t.is_complete()).count()
    }

    #[must_use]
    pub fn count_incomplete(&self) -> usize {
        self.len() - self.count_complete()
    }

    /// Remove every task, returning how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.tasks.len();
        self.tasks.clear();
        removed
    }

    /// Remove completed tasks, returning how many were removed.
    pub fn clear_complete(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| !task.is_complete());
        before - self.tasks.len()
    }
}

fn sort_by_creation(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}
