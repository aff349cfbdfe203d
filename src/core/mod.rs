//! Core abstractions for smart-todo.
//!
//! This module provides the date resolver, shared value types and the clock
//! trait used across features.

mod datetime;
mod duration;
mod priority;
mod traits;

pub use datetime::{resolve_date, resolve_time, Meridiem, ResolutionError};
pub use duration::TaskDuration;
pub use priority::Priority;
pub use traits::{Clock, FixedClock, SystemClock};
