//! The query session: the catalog plus the current working result set.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::domain::{DomainError, TripRecord};

use super::predicate::filter_trips;
use super::rank::rank_trips;
use super::{Query, QueryError, QueryInput, Reduction};

/// Error from running a search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The query input could not be normalized
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    /// A catalog record held data the search could not use
    #[error("invalid trip data: {0}")]
    InvalidRecord(#[from] DomainError),
}

/// Where the session is in its search lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No search has run yet; there is no working set.
    All,
    /// The result of the last search.
    Filtered(Vec<Arc<TripRecord>>),
    /// A previous working set narrowed by a reduction.
    Reduced {
        by: Reduction,
        trips: Vec<Arc<TripRecord>>,
    },
}

impl SessionState {
    /// The working set this state holds.
    pub fn trips(&self) -> &[Arc<TripRecord>] {
        match self {
            SessionState::All => &[],
            SessionState::Filtered(trips) | SessionState::Reduced { trips, .. } => trips,
        }
    }

    /// Short name for logs and views.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::All => "all",
            SessionState::Filtered(_) => "filtered",
            SessionState::Reduced { .. } => "reduced",
        }
    }
}

/// A search session over one catalog.
///
/// Searching replaces the working set; reducing narrows it in place.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use wayfare_server::catalog::Catalog;
/// use wayfare_server::domain::TripRecord;
/// use wayfare_server::query::{QueryInput, QuerySession, SortKey};
///
/// let trip = |bus: &str, fare: &str| TripRecord {
///     bus_number: bus.into(),
///     fare: fare.into(),
///     days_of_operation: "Monday".into(),
///     ..Default::default()
/// };
/// let catalog = Arc::new(Catalog::new([trip("A", "500"), trip("B", "300")]));
/// let mut session = QuerySession::new(catalog);
///
/// let mut input = QueryInput::new(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// input.sort = Some(SortKey::Fare);
///
/// let found = session.search_input(&input).unwrap();
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].bus_number, "B");
///
/// let cheapest = session.reduce_cheapest().unwrap();
/// assert_eq!(cheapest.len(), 1);
/// assert_eq!(session.current_results().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct QuerySession {
    catalog: Arc<Catalog>,
    state: SessionState,
}

impl QuerySession {
    /// Start a session over a loaded catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            state: SessionState::All,
        }
    }

    /// The catalog this session searches.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The current working set; empty before the first search.
    pub fn current_results(&self) -> &[Arc<TripRecord>] {
        self.state.trips()
    }

    /// Filter the catalog by `query`, rank the matches, and make them the
    /// working set.
    ///
    /// On error the previous working set is left in place.
    pub fn search(&mut self, query: &Query) -> Result<Vec<Arc<TripRecord>>, SearchError> {
        let matched = filter_trips(self.catalog.trips(), query).inspect_err(|e| {
            warn!(error = %e, "Search aborted while filtering");
        })?;
        let ranked = rank_trips(matched, query.sort).inspect_err(|e| {
            warn!(error = %e, "Search aborted while ranking");
        })?;

        debug!(
            origin = %query.origin,
            destination = %query.destination,
            weekday = ?query.weekday,
            sort = ?query.sort,
            results = ranked.len(),
            "Search complete"
        );

        self.state = SessionState::Filtered(ranked.clone());
        Ok(ranked)
    }

    /// Normalize raw input and search with it.
    pub fn search_input(&mut self, input: &QueryInput) -> Result<Vec<Arc<TripRecord>>, SearchError> {
        let query = Query::from_input(input)?;
        self.search(&query)
    }

    /// Narrow the working set to its cheapest trip.
    pub fn reduce_cheapest(&mut self) -> Result<Vec<Arc<TripRecord>>, SearchError> {
        self.reduce(Reduction::Cheapest)
    }

    /// Narrow the working set to its fastest trip.
    pub fn reduce_fastest(&mut self) -> Result<Vec<Arc<TripRecord>>, SearchError> {
        self.reduce(Reduction::Fastest)
    }

    /// Replace the working set with its single best trip.
    ///
    /// An empty working set is left alone and gives an empty result.
    pub fn reduce(&mut self, by: Reduction) -> Result<Vec<Arc<TripRecord>>, SearchError> {
        let Some(best) = by.apply(self.current_results())? else {
            debug!(reduction = by.as_str(), state = self.state.name(), "Nothing to reduce");
            return Ok(Vec::new());
        };

        debug!(
            reduction = by.as_str(),
            from = self.current_results().len(),
            bus = %best.bus_number,
            "Reduced working set"
        );

        let trips = vec![best];
        self.state = SessionState::Reduced {
            by,
            trips: trips.clone(),
        };
        Ok(trips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortKey;
    use chrono::NaiveDate;

    fn trip(bus: &str, fare: &str, days: &str, duration: &str) -> TripRecord {
        TripRecord {
            bus_number: bus.into(),
            operator_name: "KSRTC".into(),
            departure_point: "Bengaluru".into(),
            arrival_point: "Mysuru".into(),
            departure_time: "08:00 AM".into(),
            days_of_operation: days.into(),
            fare: fare.into(),
            rating: "4.0".into(),
            duration: duration.into(),
            air_conditioned: "Yes".into(),
            sleeper: "No".into(),
            seats: "10".into(),
        }
    }

    fn session() -> QuerySession {
        QuerySession::new(Arc::new(Catalog::new([
            trip("A", "500", "Monday,Wednesday", "2h 0m"),
            trip("B", "300", "Monday", "4h 0m"),
            trip("C", "300", "Tuesday", "1h 0m"),
            trip("D", "700", "Monday", "3h 0m"),
        ])))
    }

    /// 2024-03-11 is a Monday.
    fn monday() -> QueryInput {
        QueryInput::new(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap())
    }

    fn bus_numbers(trips: &[Arc<TripRecord>]) -> Vec<&str> {
        trips.iter().map(|t| t.bus_number.as_str()).collect()
    }

    #[test]
    fn starts_with_no_working_set() {
        let session = session();
        assert_eq!(session.state(), &SessionState::All);
        assert!(session.current_results().is_empty());
        assert_eq!(session.catalog().len(), 4);
    }

    #[test]
    fn search_filters_and_ranks() {
        let mut session = session();
        let mut input = monday();
        input.sort = Some(SortKey::Fare);

        let found = session.search_input(&input).unwrap();
        assert_eq!(bus_numbers(&found), ["B", "A", "D"]);
        assert_eq!(bus_numbers(session.current_results()), ["B", "A", "D"]);
        assert!(matches!(session.state(), SessionState::Filtered(_)));
    }

    #[test]
    fn weekday_scenario() {
        let mut session = QuerySession::new(Arc::new(Catalog::new([
            trip("A", "500", "Monday,Wednesday", "2h 0m"),
            trip("B", "300", "Monday", "4h 0m"),
            trip("C", "300", "Tuesday", "1h 0m"),
        ])));

        let found = session.search_input(&monday()).unwrap();
        assert_eq!(bus_numbers(&found), ["A", "B"]);

        let mut input = monday();
        input.sort = Some(SortKey::Fare);
        let found = session.search_input(&input).unwrap();
        assert_eq!(bus_numbers(&found), ["B", "A"]);

        let cheapest = session.reduce_cheapest().unwrap();
        assert_eq!(bus_numbers(&cheapest), ["B"]);
    }

    #[test]
    fn reductions_replace_working_set() {
        let mut session = session();
        session.search_input(&monday()).unwrap();

        let fastest = session.reduce_fastest().unwrap();
        assert_eq!(bus_numbers(&fastest), ["A"]);
        assert_eq!(bus_numbers(session.current_results()), ["A"]);
        assert!(matches!(
            session.state(),
            SessionState::Reduced {
                by: Reduction::Fastest,
                ..
            }
        ));

        // Reducing a singleton keeps it
        let cheapest = session.reduce_cheapest().unwrap();
        assert_eq!(bus_numbers(&cheapest), ["A"]);
    }

    #[test]
    fn search_after_reduction_restores_full_set() {
        let mut session = session();
        session.search_input(&monday()).unwrap();
        session.reduce_cheapest().unwrap();
        assert_eq!(session.current_results().len(), 1);

        let found = session.search_input(&monday()).unwrap();
        assert_eq!(found.len(), 3);
        assert!(matches!(session.state(), SessionState::Filtered(_)));
    }

    #[test]
    fn reduce_before_search_is_noop() {
        let mut session = session();

        assert!(session.reduce_cheapest().unwrap().is_empty());
        assert!(session.reduce_fastest().unwrap().is_empty());
        assert_eq!(session.state(), &SessionState::All);
    }

    #[test]
    fn reduce_empty_result_is_noop() {
        let mut session = session();
        let mut input = monday();
        input.origin = "Hubballi".into();

        assert!(session.search_input(&input).unwrap().is_empty());
        assert!(session.reduce_cheapest().unwrap().is_empty());
        assert_eq!(session.state(), &SessionState::Filtered(vec![]));
    }

    #[test]
    fn invalid_query_keeps_previous_results() {
        let mut session = session();
        session.search_input(&monday()).unwrap();

        let mut input = monday();
        input.max_fare = "abc".into();
        let err = session.search_input(&input).unwrap_err();

        assert_eq!(
            err,
            SearchError::InvalidQuery(QueryError::InvalidMaxFare("abc".into()))
        );
        assert_eq!(session.current_results().len(), 3);
    }

    #[test]
    fn invalid_record_fails_search_and_keeps_previous_results() {
        let mut session = QuerySession::new(Arc::new(Catalog::new([
            trip("A", "500", "Monday", "2h 0m"),
            trip("B", "call us", "Monday", "2h 0m"),
        ])));

        // No fare constraint or fare sort: fares are never read
        assert_eq!(session.search_input(&monday()).unwrap().len(), 2);

        let mut input = monday();
        input.sort = Some(SortKey::Fare);
        assert!(matches!(
            session.search_input(&input),
            Err(SearchError::InvalidRecord(_))
        ));
        assert_eq!(session.current_results().len(), 2);

        // Cheapest reads every fare in the working set
        assert!(matches!(
            session.reduce_cheapest(),
            Err(SearchError::InvalidRecord(_))
        ));
        assert!(matches!(session.state(), SessionState::Filtered(_)));
    }

    #[test]
    fn swap_then_search() {
        let mut session = QuerySession::new(Arc::new(Catalog::new([TripRecord {
            departure_point: "Mysuru".into(),
            arrival_point: "Bengaluru".into(),
            ..trip("R", "200", "Monday", "3h 0m")
        }])));

        let mut input = monday();
        input.origin = "Bengaluru".into();
        input.destination = "Mysuru".into();
        assert!(session.search_input(&input).unwrap().is_empty());

        input.swap();
        assert_eq!(bus_numbers(&session.search_input(&input).unwrap()), ["R"]);
    }

    #[test]
    fn search_error_display() {
        let err = SearchError::from(DomainError::NonNumeric {
            column: "Fare (INR)",
            value: "x".into(),
        });
        assert_eq!(
            err.to_string(),
            "invalid trip data: column `Fare (INR)` holds non-numeric value \"x\""
        );
    }
}
