//! Marker grammar for task text.
//!
//! Each marker kind has one matcher. [`scan`] runs all of them and keeps a
//! non-overlapping subset: candidates are ordered by start offset and any
//! candidate that begins inside an already accepted span is dropped, so the
//! result never depends on the order the matchers are listed in.
//!
//! A tag normally needs a non-word character before its `@`. The one
//! exception is a tag that starts exactly where another non-tag marker ends,
//! as in `#high@work` or `due:tomorrow@work`.

use std::ops::Range;

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::core::{resolve_time, Meridiem, ResolutionError, TaskDuration};

/// The kinds of marker recognised in task text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerKind {
    /// `@word`
    Tag,
    /// `#high`, `#medium`, `#low`
    Priority,
    /// `due:<expression>`
    DueDate,
    /// `at 3pm`, `by 14:30`
    Time,
    /// `assigned:<email>`
    Email,
    /// `1h30m`, `45m`, `2h`
    Duration,
}

impl MarkerKind {
    /// Every kind, in tie-break order.
    pub const ALL: [Self; 6] = [
        Self::Tag,
        Self::Priority,
        Self::DueDate,
        Self::Time,
        Self::Email,
        Self::Duration,
    ];
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Tag => "tag",
            Self::Priority => "priority",
            Self::DueDate => "due date",
            Self::Time => "time",
            Self::Email => "email",
            Self::Duration => "duration",
        })
    }
}

/// Hour, minute and meridiem captured by the time matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    /// Hour as written (1-2 digits).
    pub hour: u32,
    /// Minute, if `:MM` was present.
    pub minute: Option<u32>,
    /// How many digits the minute was written with; 0 without a minute.
    pub minute_digits: usize,
    /// `am`/`pm`, if present.
    pub meridiem: Option<Meridiem>,
}

impl TimeParts {
    /// Resolve to a time of day. The minute must be written as exactly two
    /// digits, so `9:5` is rejected rather than read as `9:05`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::InvalidTime`] for a malformed minute or an
    /// out-of-range hour or minute.
    pub fn resolve(&self) -> Result<NaiveTime, ResolutionError> {
        if self.minute.is_some() && self.minute_digits != 2 {
            return Err(ResolutionError::InvalidTime(
                "minute must be two digits".to_string(),
            ));
        }
        resolve_time(self.hour, self.minute, self.meridiem)
    }
}

/// Hour and minute components captured by the duration matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationParts {
    /// The `<n>h` component.
    pub hours: Option<u32>,
    /// The `<n>m` component.
    pub minutes: Option<u32>,
}

impl DurationParts {
    /// Combine the components into a duration. `None` for a zero or
    /// overflowing length.
    #[must_use]
    pub fn to_duration(&self) -> Option<TaskDuration> {
        TaskDuration::from_parts(self.hours.unwrap_or(0), self.minutes.unwrap_or(0))
    }
}

/// Payload of a recognised marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Tag name, lowercased. May be empty for a bare `@`.
    Tag(String),
    /// Priority keyword, lowercased.
    Priority(String),
    /// Raw expression after `due:`, verbatim.
    DueDate(String),
    /// Time of day.
    Time(TimeParts),
    /// Raw text after `assigned:`, verbatim.
    Email(String),
    /// Duration components.
    Duration(DurationParts),
}

impl Marker {
    /// The kind of this marker.
    #[must_use]
    pub const fn kind(&self) -> MarkerKind {
        match self {
            Self::Tag(_) => MarkerKind::Tag,
            Self::Priority(_) => MarkerKind::Priority,
            Self::DueDate(_) => MarkerKind::DueDate,
            Self::Time(_) => MarkerKind::Time,
            Self::Email(_) => MarkerKind::Email,
            Self::Duration(_) => MarkerKind::Duration,
        }
    }
}

/// A marker found in the input, with the byte span it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    /// Parsed payload.
    pub marker: Marker,
    /// Byte range in the original text.
    pub span: Range<usize>,
    /// The matched substring.
    pub text: String,
}

impl MarkerMatch {
    /// The kind of the contained marker.
    #[must_use]
    pub const fn kind(&self) -> MarkerKind {
        self.marker.kind()
    }
}

// Compiled regex patterns
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // What precedes the "@" is checked in tag_candidates
    Regex::new(r"@(?P<name>\w*)").unwrap_or_else(|e| panic!("Invalid tag regex: {e}"))
});

static PRIORITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)#(?P<level>high|medium|low)\b")
        .unwrap_or_else(|e| panic!("Invalid priority regex: {e}"))
});

static DUE_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // Known forms first; any other token is still captured so that it fails
    // resolution instead of leaking into the description.
    Regex::new(
        r"(?i)\bdue:(?P<expr>(?:\d{4}-\d{2}-\d{2}|today|tomorrow|yesterday|next\s+week|next\s+month|\d+\s+(?:days?|weeks?))\b|\S+)",
    )
    .unwrap_or_else(|e| panic!("Invalid due date regex: {e}"))
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:at|by)\s+(?P<hour>\d{1,2})(?::(?P<minute>\d+))?(?:\s*(?P<meridiem>am|pm))?\b",
    )
    .unwrap_or_else(|e| panic!("Invalid time regex: {e}"))
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // A well-formed address first, so trailing punctuation stays in the text.
    // Otherwise the whole token is captured and the validator rejects it.
    Regex::new(
        r"(?i)\bassigned:(?P<email>[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b|[^\s,;]*)",
    )
    .unwrap_or_else(|e| panic!("Invalid email regex: {e}"))
});

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:(?P<hours>\d+)h(?:\s*(?P<minutes>\d+)m)?|(?P<only_minutes>\d+)m)\b")
        .unwrap_or_else(|e| panic!("Invalid duration regex: {e}"))
});

/// Run the matcher for one marker kind.
///
/// Matches of a single kind never overlap each other; overlaps between
/// kinds are only resolved by [`scan`].
#[must_use]
pub fn find_markers(kind: MarkerKind, text: &str) -> Vec<MarkerMatch> {
    match kind {
        MarkerKind::Tag => find_tags(text),
        MarkerKind::Priority => collect(&PRIORITY_PATTERN, text, |caps| {
            Some(Marker::Priority(caps.name("level")?.as_str().to_lowercase()))
        }),
        MarkerKind::DueDate => collect(&DUE_DATE_PATTERN, text, |caps| {
            Some(Marker::DueDate(caps.name("expr")?.as_str().to_string()))
        }),
        MarkerKind::Time => collect(&TIME_PATTERN, text, |caps| {
            Some(Marker::Time(TimeParts {
                hour: number(caps.name("hour"))?,
                minute: number(caps.name("minute")),
                minute_digits: caps.name("minute").map_or(0, |m| m.as_str().len()),
                meridiem: caps
                    .name("meridiem")
                    .and_then(|m| Meridiem::from_suffix(m.as_str())),
            }))
        }),
        MarkerKind::Email => collect(&EMAIL_PATTERN, text, |caps| {
            Some(Marker::Email(caps.name("email")?.as_str().to_string()))
        }),
        MarkerKind::Duration => collect(&DURATION_PATTERN, text, |caps| {
            Some(Marker::Duration(DurationParts {
                hours: number(caps.name("hours")),
                minutes: number(caps.name("minutes")).or_else(|| number(caps.name("only_minutes"))),
            }))
        }),
    }
}

/// Find every marker in `text`, keeping the leftmost one wherever two
/// candidates overlap.
///
/// The result is sorted by start offset and its spans are disjoint.
///
/// # Examples
///
/// ```
/// use smart_todo::features::nlp::{scan, MarkerKind};
///
/// let markers = scan("Review code assigned:alice@example.com");
/// assert_eq!(markers.len(), 1);
/// assert_eq!(markers[0].kind(), MarkerKind::Email);
/// ```
#[must_use]
pub fn scan(text: &str) -> Vec<MarkerMatch> {
    let mut candidates: Vec<(MarkerMatch, bool)> = MarkerKind::ALL
        .iter()
        .filter(|kind| **kind != MarkerKind::Tag)
        .flat_map(|kind| find_markers(*kind, text))
        .map(|m| (m, false))
        .chain(tag_candidates(text))
        .collect();

    candidates.sort_by(|(a, _), (b, _)| {
        a.span
            .start
            .cmp(&b.span.start)
            .then_with(|| b.span.len().cmp(&a.span.len()))
            .then_with(|| a.kind().cmp(&b.kind()))
    });

    let mut accepted: Vec<MarkerMatch> = Vec::with_capacity(candidates.len());
    let mut claimed_until = 0;

    for (candidate, attached) in candidates {
        if candidate.span.start < claimed_until {
            debug!(
                kind = %candidate.kind(),
                text = %candidate.text,
                "discarding marker overlapping an earlier match"
            );
            continue;
        }
        if attached {
            let follows_marker = accepted.last().is_some_and(|prev| {
                prev.span.end == candidate.span.start && prev.kind() != MarkerKind::Tag
            });
            if !follows_marker {
                continue;
            }
        }
        claimed_until = candidate.span.end;
        accepted.push(candidate);
    }

    accepted
}

/// Tags standing on their own: the `@` is at the start of the text or
/// after a non-word character, so `bob@example.com` yields nothing.
fn find_tags(text: &str) -> Vec<MarkerMatch> {
    tag_candidates(text)
        .into_iter()
        .filter_map(|(m, attached)| (!attached).then_some(m))
        .collect()
}

/// Every `@name`, flagged `true` when a word character sits right before
/// the `@`.
fn tag_candidates(text: &str) -> Vec<(MarkerMatch, bool)> {
    TAG_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.name("name")?.as_str().to_lowercase();
            let attached = text[..whole.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
            let found = MarkerMatch {
                marker: Marker::Tag(name),
                span: whole.range(),
                text: whole.as_str().to_string(),
            };
            Some((found, attached))
        })
        .collect()
}

fn collect<F>(pattern: &Regex, text: &str, build: F) -> Vec<MarkerMatch>
where
    F: Fn(&Captures<'_>) -> Option<Marker>,
{
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(MarkerMatch {
                marker: build(&caps)?,
                span: whole.range(),
                text: whole.as_str().to_string(),
            })
        })
        .collect()
}

/// Digits captured by a pattern. Values too large for `u32` saturate so the
/// validator can report them.
fn number(m: Option<regex::Match<'_>>) -> Option<u32> {
    m.map(|m| m.as_str().parse().unwrap_or(u32::MAX))
}
