//! Natural language task parser.
//!
//! Parses strings like "Buy milk @shopping #high due:tomorrow at 3pm"
//! into a description plus structured task fields.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::{resolve_date, Priority, ResolutionError, TaskDuration};

use super::patterns::{scan, DurationParts, Marker, MarkerMatch};
use super::validator::{validate_fields, RawFields};

const DATE_FORMS_HINT: &str =
    "expected YYYY-MM-DD, today, tomorrow, yesterday, next week, next month, or '<n> days'/'<n> weeks'";

/// Result of parsing a natural language task string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTask {
    /// The task text with every marker removed.
    pub description: String,
    /// Tags from `@tag` markers, lowercased and deduplicated.
    pub tags: Vec<String>,
    /// Priority from a `#high`/`#medium`/`#low` marker.
    pub priority: Option<Priority>,
    /// Resolved `due:` date.
    pub due_date: Option<NaiveDate>,
    /// Time from an `at`/`by` marker.
    pub due_time: Option<NaiveTime>,
    /// Assignee from `assigned:<email>`, lowercased.
    pub assignee_email: Option<String>,
    /// Estimated duration.
    pub duration: Option<TaskDuration>,
}

impl ParsedTask {
    /// Check if any structured field was extracted.
    #[must_use]
    pub fn has_fields(&self) -> bool {
        !self.tags.is_empty()
            || self.priority.is_some()
            || self.has_schedule()
            || self.assignee_email.is_some()
            || self.duration.is_some()
    }

    /// Check if this task has a due date or time.
    #[must_use]
    pub const fn has_schedule(&self) -> bool {
        self.due_date.is_some() || self.due_time.is_some()
    }
}

/// Discriminant of [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A `due:` expression could not be resolved.
    InvalidDueDate,
    /// An `at`/`by` time was out of range.
    InvalidTime,
    /// One or more fields failed validation.
    ValidationFailed,
    /// Nothing was left once markers were removed.
    EmptyDescription,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::InvalidDueDate => "invalid_due_date",
            Self::InvalidTime => "invalid_time",
            Self::ValidationFailed => "validation_failed",
            Self::EmptyDescription => "empty_description",
        })
    }
}

/// Why task text was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `due:` expression could not be resolved.
    #[error("invalid due date '{expression}': {detail}")]
    InvalidDueDate {
        /// The expression after `due:`.
        expression: String,
        /// What went wrong.
        detail: String,
    },

    /// An `at`/`by` time was out of range.
    #[error("invalid time '{expression}': {detail}")]
    InvalidTime {
        /// The matched time text, e.g. `at 25:00`.
        expression: String,
        /// What went wrong.
        detail: String,
    },

    /// One or more fields failed validation.
    #[error("validation failed: {}", .reasons.join("; "))]
    ValidationFailed {
        /// Every failure found.
        reasons: Vec<String>,
    },

    /// Nothing was left once markers were removed.
    #[error("task description cannot be empty")]
    EmptyDescription,
}

impl ParseError {
    /// The kind of failure.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            Self::InvalidDueDate { .. } => ParseErrorKind::InvalidDueDate,
            Self::InvalidTime { .. } => ParseErrorKind::InvalidTime,
            Self::ValidationFailed { .. } => ParseErrorKind::ValidationFailed,
            Self::EmptyDescription => ParseErrorKind::EmptyDescription,
        }
    }

    /// Human-readable details, one entry per problem.
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::InvalidDueDate { expression, detail }
            | Self::InvalidTime { expression, detail } => {
                vec![format!("'{expression}': {detail}")]
            },
            Self::ValidationFailed { reasons } => reasons.clone(),
            Self::EmptyDescription => vec![self.to_string()],
        }
    }
}

/// Parse a natural language task string into structured data.
///
/// Relative due dates are resolved against `reference`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use smart_todo::core::Priority;
/// use smart_todo::features::nlp::parse_task;
///
/// let today = NaiveDate::from_ymd_opt(2025, 10, 17).unwrap();
/// let task = parse_task("Buy milk @shopping #high due:tomorrow", today).unwrap();
/// assert_eq!(task.description, "Buy milk");
/// assert_eq!(task.tags, vec!["shopping"]);
/// assert_eq!(task.priority, Some(Priority::High));
/// assert_eq!(task.due_date, today.succ_opt());
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] when a due date or time cannot be resolved, a
/// field fails validation, or the description is empty.
pub fn parse_task(input: &str, reference: NaiveDate) -> Result<ParsedTask, ParseError> {
    let markers = scan(input);
    for m in &markers {
        debug!(kind = %m.kind(), text = %m.text, "accepted marker");
    }

    let mut task = ParsedTask::default();

    // Dates and times first: they fail the parse on their own
    for m in &markers {
        if let Marker::DueDate(expression) = &m.marker {
            let date = resolve_date(expression, reference).map_err(|e| {
                ParseError::InvalidDueDate {
                    expression: expression.clone(),
                    detail: resolution_detail(e),
                }
            })?;
            keep_first(&mut task.due_date, date, m);
        }
    }

    for m in &markers {
        if let Marker::Time(parts) = &m.marker {
            let time = parts.resolve().map_err(|e| ParseError::InvalidTime {
                expression: m.text.clone(),
                detail: resolution_detail(e),
            })?;
            keep_first(&mut task.due_time, time, m);
        }
    }

    let fields = raw_fields(&markers);
    let outcome = validate_fields(&fields, reference);
    if !outcome.is_valid() {
        return Err(ParseError::ValidationFailed {
            reasons: outcome.into_reasons(),
        });
    }

    task.description = strip_markers(input, &markers);
    if task.description.is_empty() {
        return Err(ParseError::EmptyDescription);
    }

    for tag in &fields.tags {
        if !task.tags.iter().any(|t| t == tag) {
            task.tags.push((*tag).to_string());
        }
    }
    task.priority = fields.priority.and_then(Priority::parse);
    task.assignee_email = fields.email.map(str::to_lowercase);
    task.duration = fields.duration.as_ref().and_then(DurationParts::to_duration);

    Ok(task)
}

/// Collect the fields the validator checks. Single-valued fields keep the
/// first marker of their kind.
fn raw_fields(markers: &[MarkerMatch]) -> RawFields<'_> {
    let mut fields = RawFields::default();
    for m in markers {
        match &m.marker {
            Marker::Tag(name) => fields.tags.push(name),
            Marker::Priority(level) => {
                fields.priority.get_or_insert(level);
            },
            Marker::Email(email) => {
                fields.email.get_or_insert(email);
            },
            Marker::Duration(parts) => {
                fields.duration.get_or_insert(*parts);
            },
            Marker::DueDate(_) | Marker::Time(_) => {},
        }
    }
    fields
}

fn keep_first<T>(slot: &mut Option<T>, value: T, m: &MarkerMatch) {
    if slot.is_none() {
        *slot = Some(value);
    } else {
        debug!(kind = %m.kind(), text = %m.text, "ignoring repeated marker");
    }
}

fn resolution_detail(err: ResolutionError) -> String {
    match err {
        ResolutionError::InvalidDateFormat(_) => DATE_FORMS_HINT.to_string(),
        ResolutionError::InvalidTime(detail) => detail,
    }
}

/// Remove marker spans and normalize whitespace. Text without markers is
/// only trimmed.
fn strip_markers(input: &str, markers: &[MarkerMatch]) -> String {
    if markers.is_empty() {
        return input.trim().to_string();
    }

    let mut remaining = String::with_capacity(input.len());
    let mut cursor = 0;
    for m in markers {
        remaining.push_str(&input[cursor..m.span.start]);
        remaining.push(' ');
        cursor = m.span.end;
    }
    remaining.push_str(&input[cursor..]);

    remaining.split_whitespace().collect::<Vec<_>>().join(" ")
}
