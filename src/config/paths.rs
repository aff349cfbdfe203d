//! Path resolution for smart-todo configuration and data files.
//!
//! All data is stored in `~/.smart-todo/`:
//! - `config.yaml` - Main configuration file
//! - `tasks.json` - The task list
//! - `backups/` - Backups taken by `backup` and before clearing

use std::path::PathBuf;

use crate::error::TodoError;

/// Paths to smart-todo configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.smart-todo/`
    pub root: PathBuf,
    /// Config file: `~/.smart-todo/config.yaml`
    pub config_file: PathBuf,
    /// Task file: `~/.smart-todo/tasks.json`
    pub data_file: PathBuf,
    /// Backups directory: `~/.smart-todo/backups/`
    pub backups: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TodoError> {
        let home = std::env::var("HOME")
            .map_err(|_| TodoError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".smart-todo")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            data_file: root.join("tasks.json"),
            backups: root.join("backups"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), TodoError> {
        for dir in [&self.root, &self.backups] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    TodoError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".smart-todo"))
        })
    }
}
