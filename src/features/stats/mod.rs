//! Statistics module.
//!
//! Provides task counts, overdue and completion figures, and small
//! terminal charts for the `stats` command.

pub mod metrics;
pub mod visualization;

pub use metrics::{PriorityCounts, TaskStats};
pub use visualization::{render_bar_chart, render_progress_bar};
