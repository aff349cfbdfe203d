//! Natural language parsing for task entry.
//!
//! This module turns free-form input like:
//! - "Buy milk @shopping #high due:tomorrow"
//! - "Team meeting at 3pm @work 1h30m"
//! - "Review code assigned:alice@example.com"
//!
//! into a description plus validated, structured task fields.

mod parser;
mod patterns;
mod validator;

pub use parser::{parse_task, ParseError, ParseErrorKind, ParsedTask};
pub use patterns::{
    find_markers, scan, DurationParts, Marker, MarkerKind, MarkerMatch, TimeParts,
};
pub use validator::{
    validate_date, validate_duration, validate_email, validate_fields, validate_priority,
    validate_tag, validate_time, RawFields, ValidationOutcome,
};
