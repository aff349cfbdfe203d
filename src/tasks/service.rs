//! Task service: a [`TodoList`] bound to its [`JsonStore`].
//!
//! Every mutation is written to disk before the call returns.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::core::{Clock, SystemClock};
use crate::error::TodoError;
use crate::features::nlp::{parse_task, ParsedTask};
use crate::storage::JsonStore;

use super::list::TodoList;
use super::types::{Task, TaskUpdate};

pub struct TaskService<C: Clock = SystemClock> {
    list: TodoList,
    store: JsonStore,
    clock: C,
    backup_on_clear: bool,
}

impl<C: Clock> TaskService<C> {
    /// Load the list from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the task file exists but cannot be loaded.
    pub fn open(store: JsonStore, clock: C) -> Result<Self, TodoError> {
        let list = store.load()?;
        Ok(Self {
            list,
            store,
            clock,
            backup_on_clear: false,
        })
    }

    /// Take a backup of the task file before any clear.
    #[must_use]
    pub const fn with_backup_on_clear(mut self, enabled: bool) -> Self {
        self.backup_on_clear = enabled;
        self
    }

    #[must_use]
    pub const fn list(&self) -> &TodoList {
        &self.list
    }

    #[must_use]
    pub const fn store(&self) -> &JsonStore {
        &self.store
    }

    /// Reference date for parsing and overdue checks.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Resolve an id or unique prefix.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `AmbiguousId`.
    pub fn find(&self, prefix: &str) -> Result<&Task, TodoError> {
        self.list.find_by_prefix(prefix)
    }

    /// Parse `text` against today's date and add the resulting task.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for rejected text and storage errors if the list
    /// cannot be saved.
    pub fn add_from_text(&mut self, text: &str) -> Result<Task, TodoError> {
        let today = self.clock.today();
        self.add_from_text_at(text, today)
    }

    /// Like [`add_from_text`](Self::add_from_text) with an explicit
    /// reference date.
    ///
    /// # Errors
    ///
    /// As for [`add_from_text`](Self::add_from_text).
    pub fn add_from_text_at(
        &mut self,
        text: &str,
        reference: NaiveDate,
    ) -> Result<Task, TodoError> {
        let parsed = parse_task(text, reference)?;
        self.add_parsed(parsed)
    }

    /// Add an already parsed task.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the list cannot be saved.
    pub fn add_parsed(&mut self, parsed: ParsedTask) -> Result<Task, TodoError> {
        let task = Task::from_parsed(parsed, self.clock.now());
        self.list.add(task.clone());
        self.save()?;
        info!(id = %task.short_id(), description = %task.description, "added task");
        Ok(task)
    }

    /// # Errors
    ///
    /// Lookup and storage errors.
    pub fn complete(&mut self, prefix: &str) -> Result<Task, TodoError> {
        let task = self.list.mark_complete(prefix, self.clock.now())?.clone();
        self.save()?;
        info!(id = %task.short_id(), "completed task");
        Ok(task)
    }

    /// # Errors
    ///
    /// Lookup and storage errors.
    pub fn incomplete(&mut self, prefix: &str) -> Result<Task, TodoError> {
        let task = self.list.mark_incomplete(prefix, self.clock.now())?.clone();
        self.save()?;
        info!(id = %task.short_id(), "reopened task");
        Ok(task)
    }

    /// # Errors
    ///
    /// `InvalidInput` for a rejected update, lookup and storage errors.
    pub fn update(&mut self, prefix: &str, update: TaskUpdate) -> Result<Task, TodoError> {
        let task = self.list.update(prefix, update, self.clock.now())?.clone();
        self.save()?;
        info!(id = %task.short_id(), "updated task");
        Ok(task)
    }

    /// # Errors
    ///
    /// Lookup and storage errors.
    pub fn delete(&mut self, prefix: &str) -> Result<Task, TodoError> {
        let task = self.list.delete(prefix)?;
        self.save()?;
        info!(id = %task.short_id(), "deleted task");
        Ok(task)
    }

    /// Remove completed tasks, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Backup and storage errors.
    pub fn clear_complete(&mut self) -> Result<usize, TodoError> {
        if self.list.count_complete() == 0 {
            return Ok(0);
        }
        self.backup_before_clear()?;
        let removed = self.list.clear_complete();
        self.save()?;
        info!(removed, "cleared completed tasks");
        Ok(removed)
    }

    /// Remove every task, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Backup and storage errors.
    pub fn clear_all(&mut self) -> Result<usize, TodoError> {
        if self.list.is_empty() {
            return Ok(0);
        }
        self.backup_before_clear()?;
        let removed = self.list.clear_all();
        self.save()?;
        info!(removed, "cleared all tasks");
        Ok(removed)
    }

    /// Copy the task file, saving first so the copy is current.
    ///
    /// # Errors
    ///
    /// Storage and I/O errors.
    pub fn backup(&self, dest: Option<&Path>) -> Result<PathBuf, TodoError> {
        self.save()?;
        self.store.backup(dest)
    }

    /// Replace the current list with a backup, returning the task count.
    ///
    /// # Errors
    ///
    /// `NotFound` or `Storage` if the backup is missing or invalid.
    pub fn restore(&mut self, src: &Path) -> Result<usize, TodoError> {
        self.list = self.store.restore(src)?;
        Ok(self.list.len())
    }

    /// Write the list to disk.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the file cannot be written.
    pub fn save(&self) -> Result<(), TodoError> {
        self.store.save(&self.list)
    }

    fn backup_before_clear(&self) -> Result<(), TodoError> {
        if self.backup_on_clear && self.store.exists() {
            let path = self.store.backup(None)?;
            info!(path = %path.display(), "backed up before clear");
        }
        Ok(())
    }
}
