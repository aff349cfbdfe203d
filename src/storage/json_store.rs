//! JSON file persistence for the task list.
//!
//! The task file lives at `~/.smart-todo/tasks.json` unless overridden.
//! Writes go to a sibling `.tmp` file that is then renamed over the target.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::error::TodoError;
use crate::tasks::TodoList;

/// Reads and writes a [`TodoList`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    backup_dir: Option<PathBuf>,
}

impl JsonStore {
    /// Create a store for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_dir: None,
        }
    }

    /// Put default backups in `dir` instead of next to the task file.
    #[must_use]
    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the task list. A missing or empty file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the file cannot be read or is not a valid task
    /// file.
    pub fn load(&self) -> Result<TodoList, TodoError> {
        Self::read_list(&self.path)
    }

    fn read_list(path: &Path) -> Result<TodoList, TodoError> {
        if !path.exists() {
            debug!(path = %path.display(), "task file not found, starting empty");
            return Ok(TodoList::new());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            TodoError::Storage(format!("Failed to read task file {}: {e}", path.display()))
        })?;

        if contents.trim().is_empty() {
            warn!(path = %path.display(), "task file is empty");
            return Ok(TodoList::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            TodoError::Storage(format!("Failed to parse task file {}: {e}", path.display()))
        })
    }

    /// Write the task list, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the file cannot be written.
    pub fn save(&self, list: &TodoList) -> Result<(), TodoError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                TodoError::Storage(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let contents = serde_json::to_string_pretty(list)?;
        let tmp = self.sibling("tmp");

        std::fs::write(&tmp, contents).map_err(|e| {
            TodoError::Storage(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            TodoError::Storage(format!(
                "Failed to replace task file {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), tasks = list.len(), "saved task file");
        Ok(())
    }

    /// Remove the task file. Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn delete(&self) -> Result<bool, TodoError> {
        if !self.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        info!(path = %self.path.display(), "deleted task file");
        Ok(true)
    }

    /// Size of the task file in bytes, 0 if absent.
    #[must_use]
    pub fn file_size(&self) -> u64 {
        std::fs::metadata(&self.path).map_or(0, |m| m.len())
    }

    /// Where a backup taken at `at` goes by default:
    /// `<file>.backup_<YYYYmmdd_HHMMSS>`, in the backup directory if one
    /// is set.
    #[must_use]
    pub fn default_backup_path(&self, at: DateTime<Local>) -> PathBuf {
        let name = format!(
            "{}.backup_{}",
            self.file_name(),
            at.format("%Y%m%d_%H%M%S")
        );
        match &self.backup_dir {
            Some(dir) => dir.join(name),
            None => self.path.with_file_name(name),
        }
    }

    /// Copy the task file to `dest`, or to the default backup path.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no task file yet, or an I/O error if
    /// the copy fails.
    pub fn backup(&self, dest: Option<&Path>) -> Result<PathBuf, TodoError> {
        if !self.exists() {
            return Err(TodoError::NotFound(self.path.display().to_string()));
        }

        let dest = dest.map_or_else(|| self.default_backup_path(Local::now()), Path::to_path_buf);
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&self.path, &dest)?;

        info!(from = %self.path.display(), to = %dest.display(), "backed up task file");
        Ok(dest)
    }

    /// Replace the task file with the backup at `src` and return the
    /// restored list.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `src` does not exist and `Storage` if it is not
    /// a valid task file. The current file is left untouched in both cases.
    pub fn restore(&self, src: &Path) -> Result<TodoList, TodoError> {
        if !src.is_file() {
            return Err(TodoError::NotFound(src.display().to_string()));
        }

        let list = Self::read_list(src)?;
        self.save(&list)?;

        info!(from = %src.display(), tasks = list.len(), "restored task file");
        Ok(list)
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| "tasks.json".to_string(), |n| n.to_string_lossy().to_string())
    }

    fn sibling(&self, extension: &str) -> PathBuf {
        self.path
            .with_file_name(format!("{}.{extension}", self.file_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    use crate::tasks::Task;

    fn sample_list() -> TodoList {
        let now = Utc.with_ymd_and_hms(2025, 10, 17, 9, 0, 0).unwrap();
        let mut list = TodoList::new();
        let mut task = Task::new("Buy milk", now);
        task.due_date = NaiveDate::from_ymd_opt(2025, 10, 18);
        list.add(task);
        list.add(Task::new("Call mom", now));
        list
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("tasks.json"));

        assert!(!store.exists());
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.file_size(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("nested/dir/tasks.json"));
        let list = sample_list();

        store.save(&list).unwrap();

        assert!(store.exists());
        assert!(store.file_size() > 0);
        assert!(!temp_dir.path().join("nested/dir/tasks.json.tmp").exists());
        assert_eq!(store.load().unwrap(), list);
    }

    #[test]
    fn test_saved_file_shape() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("tasks.json"));
        store.save(&sample_list()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["tasks"].as_object().unwrap().len(), 2);
        assert!(raw.contains('\n'));
    }

    #[test]
    fn test_load_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonStore::new(&path).load().unwrap_err();
        assert!(matches!(err, TodoError::Storage(_)));
        assert!(err.to_string().contains("tasks.json"));
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        std::fs::write(&path, "  \n").unwrap();

        assert!(JsonStore::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("tasks.json"));

        assert!(!store.delete().unwrap());
        store.save(&TodoList::new()).unwrap();
        assert!(store.delete().unwrap());
        assert!(!store.exists());
    }

    #[test]
    fn test_default_backup_path() {
        let at = Local.with_ymd_and_hms(2025, 10, 17, 14, 30, 5).unwrap();

        let store = JsonStore::new("/data/tasks.json");
        assert_eq!(
            store.default_backup_path(at),
            PathBuf::from("/data/tasks.json.backup_20251017_143005")
        );

        let store = store.with_backup_dir("/data/backups");
        assert_eq!(
            store.default_backup_path(at),
            PathBuf::from("/data/backups/tasks.json.backup_20251017_143005")
        );
    }

    #[test]
    fn test_backup_and_restore() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("tasks.json"))
            .with_backup_dir(temp_dir.path().join("backups"));
        let list = sample_list();
        store.save(&list).unwrap();

        let backup = store.backup(None).unwrap();
        assert!(backup.starts_with(temp_dir.path().join("backups")));
        assert!(backup.exists());

        store.save(&TodoList::new()).unwrap();
        assert!(store.load().unwrap().is_empty());

        let restored = store.restore(&backup).unwrap();
        assert_eq!(restored, list);
        assert_eq!(store.load().unwrap(), list);
    }

    #[test]
    fn test_backup_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("tasks.json"));
        store.save(&sample_list()).unwrap();

        let dest = temp_dir.path().join("copy.json");
        assert_eq!(store.backup(Some(dest.as_path())).unwrap(), dest);
        assert!(dest.exists());
    }

    #[test]
    fn test_backup_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("tasks.json"));
        assert!(matches!(store.backup(None), Err(TodoError::NotFound(_))));
    }

    #[test]
    fn test_restore_rejects_bad_backup() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("tasks.json"));
        store.save(&sample_list()).unwrap();

        let bad = temp_dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"tasks": 5}"#).unwrap();
        assert!(store.restore(&bad).is_err());
        assert!(store.restore(&temp_dir.path().join("missing.json")).is_err());
        assert_eq!(store.load().unwrap().len(), 2);
    }
}
