//! Tasks and the task collection.
//!
//! - `types`: the persisted [`Task`] record
//! - `list`: the in-memory [`TodoList`] with lookup, filtering and search
//! - `service`: [`TaskService`], which parses input and keeps the list on disk

mod list;
mod service;
mod types;

pub use list::{StatusFilter, TaskFilter, TodoList};
pub use service::TaskService;
pub use types::{Task, TaskStatus, TaskUpdate};
