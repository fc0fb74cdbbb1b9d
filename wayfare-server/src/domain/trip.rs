//! Trip records.

use std::collections::HashMap;

use chrono::{NaiveTime, Weekday};
use serde::Serialize;

use super::normalize::{parse_duration_minutes, parse_fare, parse_rating, parse_time_of_day};
use super::{DomainError, Normalized, day_name};

/// Column names of the catalog file.
pub mod column {
    pub const BUS_NUMBER: &str = "Bus Number";
    pub const OPERATOR: &str = "Bus Name";
    pub const DEPARTURE: &str = "Departure";
    pub const DESTINATION: &str = "Destination";
    pub const TIMING: &str = "Timing";
    pub const DAYS: &str = "Day of Departure";
    pub const FARE: &str = "Fare (INR)";
    pub const RATING: &str = "Ratings";
    pub const DURATION: &str = "Duration";
    pub const AC: &str = "AC";
    pub const SLEEPER: &str = "Sleeper";
    pub const SEATS: &str = "Seats";

    /// Every column a catalog row must provide.
    pub const ALL: [&str; 12] = [
        BUS_NUMBER,
        OPERATOR,
        DEPARTURE,
        DESTINATION,
        TIMING,
        DAYS,
        FARE,
        RATING,
        DURATION,
        AC,
        SLEEPER,
        SEATS,
    ];
}

/// One scheduled bus service from the catalog.
///
/// All fields hold the catalog text verbatim. Records are shared behind
/// `Arc` once loaded and never modified; filtering, sorting and reducing
/// only ever produce new views over them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TripRecord {
    /// Bus identifier (not guaranteed unique).
    pub bus_number: String,
    /// Operator name, may be empty.
    pub operator_name: String,
    /// Place the bus departs from.
    pub departure_point: String,
    /// Place the bus arrives at.
    pub arrival_point: String,
    /// 12-hour departure time, e.g. "09:30 PM".
    pub departure_time: String,
    /// Free text naming the weekdays the service runs, e.g. "Monday, Friday".
    pub days_of_operation: String,
    /// Whole-number fare.
    pub fare: String,
    /// Decimal rating, typically 0.0-5.0.
    pub rating: String,
    /// Travel time, e.g. "7h 45m".
    pub duration: String,
    /// "Yes" (any case) when air-conditioned.
    pub air_conditioned: String,
    /// "Yes" (any case) when a sleeper coach.
    pub sleeper: String,
    /// Seat availability, passed through unmodified.
    pub seats: String,
}

impl TripRecord {
    /// Build a record from a string-keyed row.
    ///
    /// Every column in [`column::ALL`] must be present; extra columns are
    /// ignored.
    pub fn from_row(row: &HashMap<String, String>) -> Result<Self, DomainError> {
        let field = |name: &'static str| {
            row.get(name)
                .cloned()
                .ok_or(DomainError::MissingField(name))
        };

        Ok(Self {
            bus_number: field(column::BUS_NUMBER)?,
            operator_name: field(column::OPERATOR)?,
            departure_point: field(column::DEPARTURE)?,
            arrival_point: field(column::DESTINATION)?,
            departure_time: field(column::TIMING)?,
            days_of_operation: field(column::DAYS)?,
            fare: field(column::FARE)?,
            rating: field(column::RATING)?,
            duration: field(column::DURATION)?,
            air_conditioned: field(column::AC)?,
            sleeper: field(column::SLEEPER)?,
            seats: field(column::SEATS)?,
        })
    }

    /// The fare as a whole number.
    pub fn fare(&self) -> Result<i64, DomainError> {
        parse_fare(column::FARE, &self.fare)
    }

    /// The rating as a decimal.
    pub fn rating(&self) -> Result<f64, DomainError> {
        parse_rating(column::RATING, &self.rating)
    }

    /// The departure time of day; midnight if the text is malformed.
    pub fn departure(&self) -> Normalized<NaiveTime> {
        parse_time_of_day(&self.departure_time)
    }

    /// The travel time in minutes; the sentinel if the text is malformed.
    pub fn duration_minutes(&self) -> Normalized<u32> {
        parse_duration_minutes(&self.duration)
    }

    /// Whether the bus departs from `place`, which must already be lowercase.
    pub fn departs_from(&self, place: &str) -> bool {
        self.departure_point.to_lowercase() == place
    }

    /// Whether the bus arrives at `place`, which must already be lowercase.
    pub fn arrives_at(&self, place: &str) -> bool {
        self.arrival_point.to_lowercase() == place
    }

    /// Whether the schedule text names the given weekday.
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.days_of_operation.contains(day_name(weekday))
    }

    /// Whether the bus is air-conditioned.
    pub fn is_air_conditioned(&self) -> bool {
        is_yes(&self.air_conditioned)
    }

    /// Whether the bus is a sleeper coach.
    pub fn is_sleeper(&self) -> bool {
        is_yes(&self.sleeper)
    }
}

fn is_yes(text: &str) -> bool {
    text.to_lowercase() == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> HashMap<String, String> {
        [
            (column::BUS_NUMBER, "KA-01-F-1234"),
            (column::OPERATOR, "KSRTC Airavat"),
            (column::DEPARTURE, "Bengaluru"),
            (column::DESTINATION, "Mysuru"),
            (column::TIMING, "06:30 AM"),
            (column::DAYS, "Monday, Wednesday, Friday"),
            (column::FARE, "450"),
            (column::RATING, "4.3"),
            (column::DURATION, "3h 15m"),
            (column::AC, "Yes"),
            (column::SLEEPER, "No"),
            (column::SEATS, "12"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn from_row_reads_every_column() {
        let trip = TripRecord::from_row(&full_row()).unwrap();

        assert_eq!(trip.bus_number, "KA-01-F-1234");
        assert_eq!(trip.operator_name, "KSRTC Airavat");
        assert_eq!(trip.departure_point, "Bengaluru");
        assert_eq!(trip.arrival_point, "Mysuru");
        assert_eq!(trip.departure_time, "06:30 AM");
        assert_eq!(trip.days_of_operation, "Monday, Wednesday, Friday");
        assert_eq!(trip.fare().unwrap(), 450);
        assert_eq!(trip.rating().unwrap(), 4.3);
        assert_eq!(trip.duration_minutes(), Normalized::Parsed(195));
        assert!(trip.is_air_conditioned());
        assert!(!trip.is_sleeper());
        assert_eq!(trip.seats, "12");
    }

    #[test]
    fn from_row_ignores_extra_columns() {
        let mut row = full_row();
        row.insert("Notes".into(), "window seats".into());
        assert!(TripRecord::from_row(&row).is_ok());
    }

    #[test]
    fn from_row_reports_missing_column() {
        for name in column::ALL {
            let mut row = full_row();
            row.remove(name);
            assert_eq!(
                TripRecord::from_row(&row).unwrap_err(),
                DomainError::MissingField(name)
            );
        }
    }

    #[test]
    fn place_matching_is_case_insensitive_and_exact() {
        let trip = TripRecord {
            departure_point: "Bengaluru".into(),
            arrival_point: "Hubballi".into(),
            ..Default::default()
        };

        assert!(trip.departs_from("bengaluru"));
        assert!(!trip.departs_from("bengal"));
        assert!(!trip.departs_from("bengaluru city"));
        assert!(trip.arrives_at("hubballi"));
        assert!(!trip.arrives_at("Hubballi"));
    }

    #[test]
    fn weekday_matching_is_substring_and_case_sensitive() {
        let trip = TripRecord {
            days_of_operation: "Monday,Wednesday".into(),
            ..Default::default()
        };

        assert!(trip.runs_on(Weekday::Mon));
        assert!(trip.runs_on(Weekday::Wed));
        assert!(!trip.runs_on(Weekday::Tue));

        let lower = TripRecord {
            days_of_operation: "monday".into(),
            ..Default::default()
        };
        assert!(!lower.runs_on(Weekday::Mon));

        let daily = TripRecord {
            days_of_operation: "Daily".into(),
            ..Default::default()
        };
        assert!(!daily.runs_on(Weekday::Mon));
    }

    #[test]
    fn yes_flags_are_case_insensitive() {
        let trip = TripRecord {
            air_conditioned: "YES".into(),
            sleeper: "yes".into(),
            ..Default::default()
        };
        assert!(trip.is_air_conditioned());
        assert!(trip.is_sleeper());

        let trip = TripRecord {
            air_conditioned: "Y".into(),
            sleeper: " yes".into(),
            ..Default::default()
        };
        assert!(!trip.is_air_conditioned());
        assert!(!trip.is_sleeper());
    }

    #[test]
    fn malformed_numbers_are_errors() {
        let trip = TripRecord {
            fare: "free".into(),
            rating: "".into(),
            ..Default::default()
        };
        assert!(matches!(
            trip.fare(),
            Err(DomainError::NonNumeric { column: "Fare (INR)", .. })
        ));
        assert!(matches!(
            trip.rating(),
            Err(DomainError::NonNumeric { column: "Ratings", .. })
        ));
    }

    #[test]
    fn malformed_times_fall_back() {
        let trip = TripRecord {
            departure_time: "soon".into(),
            duration: "a while".into(),
            ..Default::default()
        };
        assert!(trip.departure().is_fallback());
        assert!(trip.duration_minutes().is_fallback());
    }
}
