//! Field normalization.
//!
//! Turns catalog text into comparable values. Time and duration text never
//! fail: unparsable input is replaced by a fixed fallback, and the result
//! records which path was taken. Fare and rating text is numeric data and a
//! malformed value is a [`DomainError`].

use chrono::NaiveTime;

use super::DomainError;
use super::time::{parse_travel_duration, parse_twelve_hour};

/// Departure time used when the catalog text cannot be parsed (12:00 AM).
///
/// Unparsable departures therefore sort as the earliest of the day.
pub const FALLBACK_TIME_OF_DAY: NaiveTime = NaiveTime::MIN;

/// Duration, in minutes, used when the catalog text cannot be parsed.
///
/// Large enough that unparsable durations sort after every real one.
pub const DURATION_SENTINEL_MINUTES: u32 = 1_000_000;

/// Outcome of a lenient parse.
///
/// Both variants carry a comparable value; `FallbackUsed` means the input
/// was malformed and the value is the documented fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized<T> {
    /// The input parsed cleanly.
    Parsed(T),
    /// The input was malformed; the value is the fallback.
    FallbackUsed(T),
}

impl<T: Copy> Normalized<T> {
    /// The comparable value, whichever path produced it.
    pub fn value(&self) -> T {
        match self {
            Normalized::Parsed(v) | Normalized::FallbackUsed(v) => *v,
        }
    }

    /// Whether the fallback was substituted for malformed input.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::FallbackUsed(_))
    }

    /// The parsed value, or `None` if the fallback was used.
    pub fn parsed(&self) -> Option<T> {
        match self {
            Normalized::Parsed(v) => Some(*v),
            Normalized::FallbackUsed(_) => None,
        }
    }
}

/// Parse a 12-hour departure time, falling back to midnight.
///
/// # Examples
///
/// ```
/// use wayfare_server::domain::{FALLBACK_TIME_OF_DAY, Normalized, parse_time_of_day};
/// use chrono::NaiveTime;
///
/// let t = parse_time_of_day("08:15 PM");
/// assert_eq!(t, Normalized::Parsed(NaiveTime::from_hms_opt(20, 15, 0).unwrap()));
///
/// let t = parse_time_of_day("late evening");
/// assert_eq!(t, Normalized::FallbackUsed(FALLBACK_TIME_OF_DAY));
/// ```
pub fn parse_time_of_day(text: &str) -> Normalized<NaiveTime> {
    match parse_twelve_hour(text) {
        Ok(time) => Normalized::Parsed(time),
        Err(_) => Normalized::FallbackUsed(FALLBACK_TIME_OF_DAY),
    }
}

/// Parse a "<H>h <M>m" duration into minutes, falling back to the sentinel.
///
/// # Examples
///
/// ```
/// use wayfare_server::domain::{DURATION_SENTINEL_MINUTES, Normalized, parse_duration_minutes};
///
/// assert_eq!(parse_duration_minutes("2h 30m"), Normalized::Parsed(150));
/// assert_eq!(
///     parse_duration_minutes("garbage"),
///     Normalized::FallbackUsed(DURATION_SENTINEL_MINUTES)
/// );
/// ```
pub fn parse_duration_minutes(text: &str) -> Normalized<u32> {
    match parse_travel_duration(text) {
        Ok(minutes) => Normalized::Parsed(minutes),
        Err(_) => Normalized::FallbackUsed(DURATION_SENTINEL_MINUTES),
    }
}

/// Parse a whole-number fare for the given column.
pub fn parse_fare(column: &'static str, text: &str) -> Result<i64, DomainError> {
    text.trim().parse().map_err(|_| DomainError::NonNumeric {
        column,
        value: text.to_string(),
    })
}

/// Parse a decimal rating for the given column.
pub fn parse_rating(column: &'static str, text: &str) -> Result<f64, DomainError> {
    text.trim().parse().map_err(|_| DomainError::NonNumeric {
        column,
        value: text.to_string(),
    })
}
