//! Error types for smart-todo.

use thiserror::Error;

use crate::features::nlp::ParseError;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum TodoError {
    /// The task text could not be parsed.
    #[error("invalid task: {0}")]
    Parse(#[from] ParseError),

    /// No task matched the given id or prefix.
    #[error("task '{0}' not found")]
    NotFound(String),

    /// An id prefix matched more than one task.
    #[error("task id prefix '{prefix}' is ambiguous ({count} matches)")]
    AmbiguousId {
        /// The prefix as typed by the user.
        prefix: String,
        /// Number of tasks sharing it.
        count: usize,
    },

    /// Input was rejected before reaching the task list.
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or saved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The task file could not be read, decoded or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TodoError {
    /// Stable snake_case identifier used in JSON error output.
    #[must_use]
    pub fn code(&self) -> String {
        match self {
            Self::Parse(err) => err.kind().to_string(),
            Self::NotFound(_) => "not_found".to_string(),
            Self::AmbiguousId { .. } => "ambiguous_id".to_string(),
            Self::InvalidInput(_) => "invalid_input".to_string(),
            Self::Config(_) => "config".to_string(),
            Self::Storage(_) => "storage".to_string(),
            Self::Io(_) => "io".to_string(),
            Self::Json(_) => "json".to_string(),
        }
    }
}
