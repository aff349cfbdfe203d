//! Feature implementations for smart-todo.
//!
//! - Natural language task parsing
//! - Statistics
//! - Shell integration
//! - Interactive session

pub mod interactive;
pub mod nlp;
pub mod shell;
pub mod stats;
