//! Date and time resolution.
//!
//! Turns the raw expression captured after a `due:` marker into a calendar
//! date, and a captured `at 3pm`-style time into a 24-hour clock time. Every
//! relative expression is anchored on a caller-supplied reference date; the
//! system clock is never consulted here.

use chrono::{Days, Months, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Failure to turn an expression into a concrete date or time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The expression is not one of the supported date forms, or names an
    /// impossible calendar date.
    #[error("invalid date format: '{0}'")]
    InvalidDateFormat(String),
    /// Hour or minute out of range for the given clock style.
    #[error("invalid time: {0}")]
    InvalidTime(String),
}

/// AM/PM suffix on a 12-hour time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// Before noon.
    Am,
    /// Noon and after.
    Pm,
}

impl Meridiem {
    /// Parse an `am`/`pm` suffix, ignoring case.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        if suffix.eq_ignore_ascii_case("am") {
            Some(Self::Am)
        } else if suffix.eq_ignore_ascii_case("pm") {
            Some(Self::Pm)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Am => "am",
            Self::Pm => "pm",
        })
    }
}

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap_or_else(|e| panic!("Invalid ISO date regex: {e}"))
});

static DAY_OFFSET: Lazy<Regex> = Lazy::new(|| {
    // "3 days", "1 week", "0 days"
    Regex::new(r"^(\d+) (day|days|week|weeks)$")
        .unwrap_or_else(|e| panic!("Invalid day offset regex: {e}"))
});

/// Resolve a due-date expression against a reference date.
///
/// Supported forms:
/// - `YYYY-MM-DD` (strict; impossible dates are rejected)
/// - `today`, `tomorrow`, `yesterday`, `next week`, `next month`
/// - `<n> day(s)`, `<n> week(s)`
///
/// `next month` keeps the day of month where possible and otherwise clamps
/// to the last day of the target month (Jan 31 → Feb 28/29).
///
/// # Errors
///
/// Returns [`ResolutionError::InvalidDateFormat`] if the expression matches
/// none of the forms above or the result falls outside the representable
/// calendar.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use smart_todo::core::resolve_date;
///
/// let reference = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// assert_eq!(
///     resolve_date("next month", reference).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
/// );
/// ```
pub fn resolve_date(expression: &str, reference: NaiveDate) -> Result<NaiveDate, ResolutionError> {
    let normalized = expression
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let invalid = || ResolutionError::InvalidDateFormat(expression.trim().to_string());

    if ISO_DATE.is_match(&normalized) {
        return NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").map_err(|_| invalid());
    }

    let resolved = match normalized.as_str() {
        "today" => Some(reference),
        "tomorrow" => reference.checked_add_days(Days::new(1)),
        "yesterday" => reference.checked_sub_days(Days::new(1)),
        "next week" => reference.checked_add_days(Days::new(7)),
        // chrono clamps to the last day of the target month
        "next month" => reference.checked_add_months(Months::new(1)),
        _ => return resolve_offset(&normalized, reference).ok_or_else(invalid),
    };

    resolved.ok_or_else(invalid)
}

/// Resolve `<n> day(s)` / `<n> week(s)`.
fn resolve_offset(input: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let caps = DAY_OFFSET.captures(input)?;
    let amount: u64 = caps.get(1)?.as_str().parse().ok()?;
    let days = if caps.get(2)?.as_str().starts_with("week") {
        amount.checked_mul(7)?
    } else {
        amount
    };

    reference.checked_add_days(Days::new(days))
}

/// Convert an hour/minute/meridiem triple into a 24-hour time.
///
/// Without a meridiem the hour must be 0-23. With `am`/`pm` it must be 1-12;
/// `12am` is midnight and `12pm` is noon. A missing minute means `:00`.
///
/// # Errors
///
/// Returns [`ResolutionError::InvalidTime`] when the hour or minute is out of
/// range.
pub fn resolve_time(
    hour: u32,
    minute: Option<u32>,
    meridiem: Option<Meridiem>,
) -> Result<NaiveTime, ResolutionError> {
    let minute = minute.unwrap_or(0);
    if minute > 59 {
        return Err(ResolutionError::InvalidTime(format!(
            "minute {minute} is out of range 0-59"
        )));
    }

    let hour = match meridiem {
        None if hour <= 23 => hour,
        None => {
            return Err(ResolutionError::InvalidTime(format!(
                "hour {hour} is out of range 0-23"
            )))
        },
        Some(period) if (1..=12).contains(&hour) => match period {
            Meridiem::Am => hour % 12,
            Meridiem::Pm => hour % 12 + 12,
        },
        Some(period) => {
            return Err(ResolutionError::InvalidTime(format!(
                "hour {hour} is out of range 1-12 for {period}"
            )))
        },
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| ResolutionError::InvalidTime(format!("{hour:02}:{minute:02}")))
}
