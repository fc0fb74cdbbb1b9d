//! Weekday names as they appear in the catalog's "Day of Departure" column.

use chrono::{Datelike, NaiveDate, Weekday};

/// The full English name of a weekday, e.g. "Monday".
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// The day of the week a calendar date falls on.
pub fn weekday_of(date: NaiveDate) -> Weekday {
    date.weekday()
}
