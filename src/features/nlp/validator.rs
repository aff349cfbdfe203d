//! Field-level validation for values extracted from task text.
//!
//! Every check is pure and returns a [`ValidationOutcome`] instead of
//! failing fast, so callers can report all problems at once.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{resolve_date, Priority};

use super::patterns::{DurationParts, TimeParts};

/// Longest accepted tag, in characters.
pub const MAX_TAG_LEN: usize = 30;

/// Longest accepted duration, in hours.
pub const MAX_DURATION_HOURS: u32 = 999;

static TAG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+$").unwrap_or_else(|e| panic!("Invalid tag regex: {e}")));

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("Invalid email regex: {e}"))
});

/// Result of a validation check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    reasons: Vec<String>,
}

impl ValidationOutcome {
    /// A passing outcome.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            reasons: Vec::new(),
        }
    }

    /// A failing outcome with one reason.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            reasons: vec![reason.into()],
        }
    }

    /// Whether no reasons were recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Human-readable failure reasons; empty when valid.
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Consume the outcome, returning its reasons.
    #[must_use]
    pub fn into_reasons(self) -> Vec<String> {
        self.reasons
    }

    /// Append the reasons of another outcome.
    pub fn merge(&mut self, other: Self) {
        self.reasons.extend(other.reasons);
    }
}

/// Raw fields gathered from task text, prior to conversion.
///
/// Absent fields are skipped by [`validate_fields`].
#[derive(Debug, Clone, Default)]
pub struct RawFields<'a> {
    /// Tag names without the `@`.
    pub tags: Vec<&'a str>,
    /// Priority keyword.
    pub priority: Option<&'a str>,
    /// Due-date expression.
    pub due_date: Option<&'a str>,
    /// Time of day.
    pub time: Option<TimeParts>,
    /// Assignee email address.
    pub email: Option<&'a str>,
    /// Duration components.
    pub duration: Option<DurationParts>,
}

/// A tag must be 1-30 word characters.
#[must_use]
pub fn validate_tag(tag: &str) -> ValidationOutcome {
    if tag.is_empty() {
        return ValidationOutcome::invalid("tag cannot be empty (nothing follows '@')");
    }
    if !TAG_CHARS.is_match(tag) {
        return ValidationOutcome::invalid(format!(
            "invalid tag '{tag}': only letters, digits and underscores are allowed"
        ));
    }
    if tag.chars().count() > MAX_TAG_LEN {
        return ValidationOutcome::invalid(format!(
            "invalid tag '{tag}': longer than {MAX_TAG_LEN} characters"
        ));
    }
    ValidationOutcome::valid()
}

/// A priority must be `high`, `medium` or `low`.
#[must_use]
pub fn validate_priority(priority: &str) -> ValidationOutcome {
    if Priority::parse(priority).is_some() {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid(format!(
            "invalid priority '{priority}': must be 'high', 'medium', or 'low'"
        ))
    }
}

/// A date expression is valid when it resolves against `reference`.
#[must_use]
pub fn validate_date(expression: &str, reference: NaiveDate) -> ValidationOutcome {
    match resolve_date(expression, reference) {
        Ok(_) => ValidationOutcome::valid(),
        Err(e) => ValidationOutcome::invalid(format!(
            "{e}: use YYYY-MM-DD, today, tomorrow, yesterday, next week, next month, or '<n> days'/'<n> weeks'"
        )),
    }
}

/// Hour 0-23 without a meridiem, 1-12 with one; minute 0-59.
#[must_use]
pub fn validate_time(time: &TimeParts) -> ValidationOutcome {
    match time.resolve() {
        Ok(_) => ValidationOutcome::valid(),
        Err(e) => ValidationOutcome::invalid(e.to_string()),
    }
}

/// An email must look like `local@domain.tld`, with no consecutive dots and
/// a domain that neither starts nor ends with `.` or `-`.
#[must_use]
pub fn validate_email(email: &str) -> ValidationOutcome {
    if email.is_empty() {
        return ValidationOutcome::invalid("email address is empty");
    }

    let mut outcome = ValidationOutcome::valid();

    if !EMAIL_SHAPE.is_match(email) {
        outcome.merge(ValidationOutcome::invalid(format!(
            "invalid email address '{email}': expected name@domain.tld"
        )));
    }
    if email.contains("..") {
        outcome.merge(ValidationOutcome::invalid(format!(
            "invalid email address '{email}': consecutive dots"
        )));
    }
    if let Some((_, domain)) = email.split_once('@') {
        let bad_edge = |c: char| c == '.' || c == '-';
        if domain.starts_with(bad_edge) || domain.ends_with(bad_edge) {
            outcome.merge(ValidationOutcome::invalid(format!(
                "invalid email address '{email}': domain cannot start or end with '.' or '-'"
            )));
        }
    }

    outcome
}

/// A duration must be non-zero, at most 999 hours, and its minute component
/// must be below 60 when hours are given.
#[must_use]
pub fn validate_duration(duration: &DurationParts) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::valid();

    match (duration.hours, duration.minutes) {
        (None, None) => return ValidationOutcome::invalid("duration has no hours or minutes"),
        (Some(h), _) if h > MAX_DURATION_HOURS => {
            outcome.merge(ValidationOutcome::invalid(format!(
                "duration of {h} hours exceeds {MAX_DURATION_HOURS}"
            )));
        },
        (None, Some(m)) if m / 60 > MAX_DURATION_HOURS => {
            outcome.merge(ValidationOutcome::invalid(format!(
                "duration of {m} minutes exceeds {MAX_DURATION_HOURS} hours"
            )));
        },
        _ => {},
    }

    if let (Some(_), Some(m)) = (duration.hours, duration.minutes) {
        if m >= 60 {
            outcome.merge(ValidationOutcome::invalid(format!(
                "duration minutes must be below 60 when hours are given (got {m})"
            )));
        }
    }

    if outcome.is_valid() && duration.to_duration().is_none() {
        outcome.merge(ValidationOutcome::invalid("duration must be greater than zero"));
    }

    outcome
}

/// Validate every present field, collecting all failures.
#[must_use]
pub fn validate_fields(fields: &RawFields<'_>, reference: NaiveDate) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::valid();

    for tag in &fields.tags {
        outcome.merge(validate_tag(tag));
    }
    if let Some(priority) = fields.priority {
        outcome.merge(validate_priority(priority));
    }
    if let Some(expression) = fields.due_date {
        outcome.merge(validate_date(expression, reference));
    }
    if let Some(time) = &fields.time {
        outcome.merge(validate_time(time));
    }
    if let Some(email) = fields.email {
        outcome.merge(validate_email(email));
    }
    if let Some(duration) = &fields.duration {
        outcome.merge(validate_duration(duration));
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Meridiem;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 17).unwrap()
    }

    #[test]
    fn test_validate_tag() {
        assert!(validate_tag("shopping").is_valid());
        assert!(validate_tag("work_2024").is_valid());
        assert!(validate_tag(&"a".repeat(30)).is_valid());
        assert!(!validate_tag(&"a".repeat(31)).is_valid());
        assert!(!validate_tag("").is_valid());
        assert!(!validate_tag("@invalid").is_valid());
        assert!(!validate_tag("two words").is_valid());
    }

    #[test]
    fn test_validate_priority() {
        assert!(validate_priority("high").is_valid());
        assert!(validate_priority("Medium").is_valid());
        assert!(validate_priority("low").is_valid());
        let outcome = validate_priority("critical");
        assert!(!outcome.is_valid());
        assert!(outcome.reasons()[0].contains("priority"));
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2025-10-20", reference()).is_valid());
        assert!(validate_date("tomorrow", reference()).is_valid());
        assert!(validate_date("2 weeks", reference()).is_valid());
        assert!(!validate_date("10/20/2025", reference()).is_valid());
        assert!(!validate_date("2025-02-30", reference()).is_valid());
    }

    #[test]
    fn test_validate_time() {
        let time = |hour, minute: Option<u32>, meridiem| TimeParts {
            hour,
            minute,
            minute_digits: minute.map_or(0, |_| 2),
            meridiem,
        };
        assert!(validate_time(&time(14, Some(0), None)).is_valid());
        assert!(validate_time(&time(3, None, Some(Meridiem::Pm))).is_valid());
        assert!(!validate_time(&time(25, None, None)).is_valid());
        assert!(!validate_time(&time(13, None, Some(Meridiem::Am))).is_valid());
        assert!(!validate_time(&time(9, Some(75), None)).is_valid());

        let short_minute = TimeParts {
            minute_digits: 1,
            ..time(9, Some(5), None)
        };
        assert!(!validate_time(&short_minute).is_valid());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_valid());
        assert!(validate_email("john.doe@company.co.uk").is_valid());
        assert!(validate_email("user+tag@test.org").is_valid());
        assert!(!validate_email("invalid-email").is_valid());
        assert!(!validate_email("").is_valid());
        assert!(!validate_email("a@b").is_valid());
    }

    #[test]
    fn test_validate_email_dots_and_edges() {
        let outcome = validate_email("john..doe@example.com");
        assert!(!outcome.is_valid());
        assert!(outcome.reasons().iter().any(|r| r.contains("consecutive dots")));

        assert!(!validate_email("bob@.example.com").is_valid());
        assert!(!validate_email("bob@-example.com").is_valid());
        assert!(!validate_email("bob@example..com").is_valid());
    }

    #[test]
    fn test_validate_duration() {
        let d = |hours, minutes| DurationParts { hours, minutes };
        assert!(validate_duration(&d(Some(1), Some(30))).is_valid());
        assert!(validate_duration(&d(None, Some(90))).is_valid());
        assert!(!validate_duration(&d(Some(1), Some(90))).is_valid());
        assert!(!validate_duration(&d(None, Some(0))).is_valid());
        assert!(!validate_duration(&d(Some(1000), None)).is_valid());
        assert!(!validate_duration(&d(Some(u32::MAX), None)).is_valid());
        assert!(!validate_duration(&d(None, None)).is_valid());
    }

    #[test]
    fn test_validate_fields_collects_all() {
        let fields = RawFields {
            tags: vec!["ok", ""],
            priority: Some("urgent"),
            email: Some("nope"),
            ..RawFields::default()
        };
        let outcome = validate_fields(&fields, reference());
        assert!(!outcome.is_valid());
        assert_eq!(outcome.reasons().len(), 3);
    }

    #[test]
    fn test_validate_fields_absent_ok() {
        assert!(validate_fields(&RawFields::default(), reference()).is_valid());
    }
}
