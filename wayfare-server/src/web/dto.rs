//! Data transfer objects for web requests and responses.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::{TripRecord, day_name, weekday_of};
use crate::query::{QueryInput, SessionState, SortKey};

/// Error from reading a submitted search form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid travel date {0:?}, expected YYYY-MM-DD")]
pub struct InvalidDate(pub String);

/// Search form, submitted as an HTML form or a query string.
///
/// Every field is optional so a bare request searches everything for
/// today.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    /// Origin place name
    #[serde(default)]
    pub origin: String,

    /// Destination place name
    #[serde(default)]
    pub destination: String,

    /// Travel date as YYYY-MM-DD (defaults to today)
    pub date: Option<String>,

    /// Checkbox: present when ticked
    pub ac: Option<String>,

    /// Checkbox: present when ticked
    pub sleeper: Option<String>,

    /// Minimum rating, blank for none
    #[serde(default)]
    pub min_rating: String,

    /// Maximum fare, blank for none
    #[serde(default)]
    pub max_fare: String,

    /// Sort selector value, e.g. "fare"
    pub sort: Option<String>,
}

impl SearchForm {
    /// Convert the form into raw query input.
    ///
    /// A blank date means `today`. Thresholds are passed through as text
    /// for [`crate::query::Query::from_input`] to validate.
    pub fn to_input(&self, today: NaiveDate) -> Result<QueryInput, InvalidDate> {
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| InvalidDate(text.to_string()))?,
        };

        Ok(QueryInput {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            date,
            ac_only: is_checked(self.ac.as_deref()),
            sleeper_only: is_checked(self.sleeper.as_deref()),
            min_rating: self.min_rating.clone(),
            max_fare: self.max_fare.clone(),
            sort: self.sort.as_deref().and_then(SortKey::parse),
        })
    }
}

/// Browsers send "on" for a ticked checkbox and nothing otherwise; API
/// callers may send "true" or "false".
pub(crate) fn is_checked(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) => !matches!(v.trim().to_lowercase().as_str(), "" | "false" | "0" | "off"),
    }
}

/// A trip in search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripResult {
    pub bus_number: String,
    pub operator: String,
    pub from: String,
    pub to: String,
    /// Departure time as listed, e.g. "09:30 PM"
    pub timing: String,
    pub days: String,
    pub fare: String,
    pub rating: String,
    /// Duration as listed, e.g. "7h 45m"
    pub duration: String,
    /// Duration in minutes, absent when the listed text is malformed
    pub duration_mins: Option<u32>,
    pub ac: bool,
    pub sleeper: bool,
    pub seats: String,
}

impl TripResult {
    /// Create from a catalog record.
    pub fn from_trip(trip: &TripRecord) -> Self {
        Self {
            bus_number: trip.bus_number.clone(),
            operator: trip.operator_name.clone(),
            from: trip.departure_point.clone(),
            to: trip.arrival_point.clone(),
            timing: trip.departure_time.clone(),
            days: trip.days_of_operation.clone(),
            fare: trip.fare.clone(),
            rating: trip.rating.clone(),
            duration: trip.duration.clone(),
            duration_mins: trip.duration_minutes().parsed(),
            ac: trip.is_air_conditioned(),
            sleeper: trip.is_sleeper(),
            seats: trip.seats.clone(),
        }
    }
}

/// Response for search and reduction requests.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Session state after the request: "all", "filtered" or "reduced"
    pub state: &'static str,

    /// Weekday searched for, when a search ran
    pub weekday: Option<&'static str>,

    /// Matching trips, in display order
    pub trips: Vec<TripResult>,
}

impl SearchResponse {
    /// Build a response from the trips a request produced.
    pub fn new<'a>(
        state: &SessionState,
        date: Option<NaiveDate>,
        trips: impl IntoIterator<Item = &'a Arc<TripRecord>>,
    ) -> Self {
        Self {
            state: state.name(),
            weekday: date.map(|d| day_name(weekday_of(d))),
            trips: trips.into_iter().map(|t| TripResult::from_trip(t)).collect(),
        }
    }
}

/// Places and operators available in the catalog.
#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub operators: Vec<String>,
}

impl PlacesResponse {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            origins: catalog.origins(),
            destinations: catalog.destinations(),
            operators: catalog.operators(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
