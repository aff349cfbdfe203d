//! Estimated task durations (`1h30m`, `45m`, `2h`).

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DURATION_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(\d+)h)?(?:(\d+)m)?$")
        .unwrap_or_else(|e| panic!("Invalid duration regex: {e}"))
});

/// A positive length of time, stored in whole minutes.
///
/// Serialized as its display form so the task file reads `"1h30m"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDuration {
    minutes: u32,
}

impl TaskDuration {
    /// Create a duration from total minutes. Zero is not a duration.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes == 0 {
            None
        } else {
            Some(Self { minutes })
        }
    }

    /// Create a duration from an hour and a minute component.
    #[must_use]
    pub fn from_parts(hours: u32, minutes: u32) -> Option<Self> {
        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .and_then(Self::from_minutes)
    }

    /// Total length in minutes.
    #[must_use]
    pub const fn total_minutes(&self) -> u32 {
        self.minutes
    }

    /// As a `chrono::Duration`.
    #[must_use]
    pub fn to_chrono(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.minutes))
    }
}

impl std::fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.minutes / 60;
        let minutes = self.minutes % 60;
        match (hours, minutes) {
            (0, m) => write!(f, "{m}m"),
            (h, 0) => write!(f, "{h}h"),
            (h, m) => write!(f, "{h}h{m}m"),
        }
    }
}

impl FromStr for TaskDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid duration '{s}': expected forms like 1h30m, 45m or 2h");
        let caps = DURATION_TEXT.captures(s.trim()).ok_or_else(invalid)?;

        let component = |idx: usize| -> Result<Option<u32>, String> {
            caps.get(idx)
                .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
                .transpose()
        };
        let hours = component(1)?;
        let minutes = component(2)?;

        if hours.is_none() && minutes.is_none() {
            return Err(invalid());
        }

        Self::from_parts(hours.unwrap_or(0), minutes.unwrap_or(0)).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TaskDuration {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskDuration> for String {
    fn from(value: TaskDuration) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(TaskDuration::from_minutes(90).unwrap().to_string(), "1h30m");
        assert_eq!(TaskDuration::from_minutes(45).unwrap().to_string(), "45m");
        assert_eq!(TaskDuration::from_minutes(120).unwrap().to_string(), "2h");
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("1h30m".parse::<TaskDuration>().unwrap().total_minutes(), 90);
        assert_eq!("45m".parse::<TaskDuration>().unwrap().total_minutes(), 45);
        assert_eq!("2H".parse::<TaskDuration>().unwrap().total_minutes(), 120);
        assert_eq!("90m".parse::<TaskDuration>().unwrap().to_string(), "1h30m");
    }

    #[test]
    fn test_parse_rejects() {
        assert!("".parse::<TaskDuration>().is_err());
        assert!("0m".parse::<TaskDuration>().is_err());
        assert!("1 hour".parse::<TaskDuration>().is_err());
        assert!("m".parse::<TaskDuration>().is_err());
        assert!("99999999999h".parse::<TaskDuration>().is_err());
    }

    #[test]
    fn test_to_chrono() {
        let d = TaskDuration::from_parts(1, 15).unwrap();
        assert_eq!(d.to_chrono(), chrono::Duration::minutes(75));
    }

    #[test]
    fn test_serde_as_string() {
        let d = TaskDuration::from_parts(2, 5).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2h5m\"");
        let back: TaskDuration = serde_json::from_str("\"2h5m\"").unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<TaskDuration>("\"soon\"").is_err());
    }
}
