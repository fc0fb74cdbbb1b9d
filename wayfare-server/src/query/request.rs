//! Query input and the normalized query built from it.

use chrono::{NaiveDate, Weekday};

use crate::domain::weekday_of;

/// Error from building a query out of raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Minimum rating text is not a number
    #[error("minimum rating must be a number, got {0:?}")]
    InvalidMinRating(String),

    /// Maximum fare text is not a whole number
    #[error("maximum fare must be a whole number, got {0:?}")]
    InvalidMaxFare(String),
}

/// The order to present matching trips in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Cheapest first.
    Fare,
    /// Earliest departure first.
    Timing,
    /// Highest rated first.
    Rating,
    /// Shortest trip first.
    Duration,
}

impl SortKey {
    /// Every sort key, in the order the selector lists them.
    pub const ALL: [SortKey; 4] = [
        SortKey::Fare,
        SortKey::Timing,
        SortKey::Rating,
        SortKey::Duration,
    ];

    /// Parse a selector value such as "fare" (any case).
    ///
    /// Returns `None` for anything unrecognized, which leaves results in
    /// catalog order.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
    }

    /// The selector value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Fare => "fare",
            SortKey::Timing => "timing",
            SortKey::Rating => "rating",
            SortKey::Duration => "duration",
        }
    }

    /// Human-readable label for the selector.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Fare => "Fare (Low → High)",
            SortKey::Timing => "Timing (Earliest First)",
            SortKey::Rating => "Rating (High → Low)",
            SortKey::Duration => "Duration (Shortest First)",
        }
    }
}

/// Raw query values as the user entered them.
///
/// Nothing here is validated; [`Query::from_input`] does that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub ac_only: bool,
    pub sleeper_only: bool,
    pub min_rating: String,
    pub max_fare: String,
    pub sort: Option<SortKey>,
}

impl QueryInput {
    /// Input with no constraints other than the travel date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            date,
            ac_only: false,
            sleeper_only: false,
            min_rating: String::new(),
            max_fare: String::new(),
            sort: None,
        }
    }

    /// Exchange origin and destination.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.origin, &mut self.destination);
    }
}

/// A validated, normalized search.
///
/// Place names are trimmed and lowercase; an empty place means "anywhere".
/// Built once per search and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub origin: String,
    pub destination: String,
    pub weekday: Weekday,
    pub ac_only: bool,
    pub sleeper_only: bool,
    pub min_rating: Option<f64>,
    pub max_fare: Option<i64>,
    pub sort: Option<SortKey>,
}

impl Query {
    /// Normalize raw input into a query.
    ///
    /// Blank thresholds mean "no constraint". A threshold that is present
    /// but not numeric is an error; it is never silently dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfare_server::query::{Query, QueryError, QueryInput};
    /// use chrono::{NaiveDate, Weekday};
    ///
    /// let mut input = QueryInput::new(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    /// input.origin = "  Bengaluru ".into();
    /// input.min_rating = "4".into();
    ///
    /// let query = Query::from_input(&input).unwrap();
    /// assert_eq!(query.origin, "bengaluru");
    /// assert_eq!(query.weekday, Weekday::Mon);
    /// assert_eq!(query.min_rating, Some(4.0));
    /// assert_eq!(query.max_fare, None);
    ///
    /// input.max_fare = "abc".into();
    /// assert_eq!(
    ///     Query::from_input(&input),
    ///     Err(QueryError::InvalidMaxFare("abc".into()))
    /// );
    /// ```
    pub fn from_input(input: &QueryInput) -> Result<Self, QueryError> {
        let min_rating = match input.min_rating.trim() {
            "" => None,
            text => Some(
                text.parse::<f64>()
                    .map_err(|_| QueryError::InvalidMinRating(input.min_rating.clone()))?,
            ),
        };

        let max_fare = match input.max_fare.trim() {
            "" => None,
            text => Some(
                text.parse::<i64>()
                    .map_err(|_| QueryError::InvalidMaxFare(input.max_fare.clone()))?,
            ),
        };

        Ok(Self {
            origin: normalize_place(&input.origin),
            destination: normalize_place(&input.destination),
            weekday: weekday_of(input.date),
            ac_only: input.ac_only,
            sleeper_only: input.sleeper_only,
            min_rating,
            max_fare,
            sort: input.sort,
        })
    }
}

fn normalize_place(place: &str) -> String {
    place.trim().to_lowercase()
}
