//! Storage layer for smart-todo.
//!
//! Tasks are persisted as a single JSON document, by default at
//! `~/.smart-todo/tasks.json`.

mod json_store;

pub use json_store::JsonStore;
