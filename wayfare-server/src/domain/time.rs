//! Clock and duration text parsing.
//!
//! The catalog stores departure times as 12-hour clock text ("09:30 PM")
//! and travel durations as "<H>h <M>m" ("7h 45m"). The strict parsers here
//! report why a value was rejected; the lenient, never-failing versions used
//! by the engine live in `normalize`.

use chrono::NaiveTime;

/// Error returned when parsing an invalid clock time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Error returned when parsing an invalid travel duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration: {reason}")]
pub struct DurationError {
    reason: &'static str,
}

impl DurationError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a 12-hour clock time such as "09:30 PM".
///
/// Surrounding whitespace is ignored. The hour may be one or two digits
/// (1-12), the minute one or two digits (0-59), and the AM/PM marker is
/// matched case-insensitively after at least one whitespace character.
///
/// # Examples
///
/// ```
/// use wayfare_server::domain::parse_twelve_hour;
/// use chrono::NaiveTime;
///
/// let t = parse_twelve_hour(" 09:30 PM ").unwrap();
/// assert_eq!(t, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
///
/// // 12 AM is midnight, 12 PM is noon
/// assert_eq!(parse_twelve_hour("12:00 AM").unwrap(), NaiveTime::MIN);
/// assert_eq!(
///     parse_twelve_hour("12:15 pm").unwrap(),
///     NaiveTime::from_hms_opt(12, 15, 0).unwrap()
/// );
///
/// assert!(parse_twelve_hour("21:30").is_err());
/// assert!(parse_twelve_hour("13:00 PM").is_err());
/// ```
pub fn parse_twelve_hour(s: &str) -> Result<NaiveTime, TimeError> {
    let s = s.trim();

    let (clock, marker) = s
        .rsplit_once(char::is_whitespace)
        .ok_or_else(|| TimeError::new("expected HH:MM AM/PM format"))?;

    let (hour, minute) = clock
        .trim_end()
        .split_once(':')
        .ok_or_else(|| TimeError::new("expected colon between hour and minute"))?;

    let hour = parse_clock_digits(hour).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if !(1..=12).contains(&hour) {
        return Err(TimeError::new("hour must be 1-12"));
    }

    let minute =
        parse_clock_digits(minute).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    let hour = if marker.eq_ignore_ascii_case("AM") {
        hour % 12
    } else if marker.eq_ignore_ascii_case("PM") {
        hour % 12 + 12
    } else {
        return Err(TimeError::new("expected AM or PM marker"));
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Parse a travel duration such as "7h 45m" into whole minutes.
///
/// The text must be exactly two whitespace-separated tokens: a whole number
/// of hours suffixed with `h`, then a whole number of minutes suffixed with
/// `m`.
///
/// # Examples
///
/// ```
/// use wayfare_server::domain::parse_travel_duration;
///
/// assert_eq!(parse_travel_duration("2h 30m").unwrap(), 150);
/// assert_eq!(parse_travel_duration("0h 5m").unwrap(), 5);
///
/// assert!(parse_travel_duration("30m 2h").is_err());
/// assert!(parse_travel_duration("2h").is_err());
/// ```
pub fn parse_travel_duration(s: &str) -> Result<u32, DurationError> {
    let mut tokens = s.split_whitespace();

    let hours = tokens
        .next()
        .ok_or_else(|| DurationError::new("missing hours"))?;
    let minutes = tokens
        .next()
        .ok_or_else(|| DurationError::new("missing minutes"))?;
    if tokens.next().is_some() {
        return Err(DurationError::new("unexpected trailing text"));
    }

    let hours = hours
        .strip_suffix('h')
        .and_then(parse_whole_number)
        .ok_or_else(|| DurationError::new("expected <int>h hours"))?;
    let minutes = minutes
        .strip_suffix('m')
        .and_then(parse_whole_number)
        .ok_or_else(|| DurationError::new("expected <int>m minutes"))?;

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| DurationError::new("duration overflow"))
}

/// Parse one or two ASCII digits.
fn parse_clock_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 {
        return None;
    }
    parse_whole_number(s)
}

fn parse_whole_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
