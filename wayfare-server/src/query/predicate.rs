//! Trip filtering.

use std::sync::Arc;

use crate::domain::{DomainError, TripRecord};

use super::Query;

/// Whether a trip satisfies every constraint of a query.
///
/// Constraints are checked in a fixed order and the first failing one
/// rejects the trip:
/// 1. origin (skipped when the query's origin is empty)
/// 2. destination (skipped when empty)
/// 3. the schedule names the query's weekday
/// 4. air-conditioned, if required
/// 5. sleeper, if required
/// 6. rating at least the minimum, if one is set
/// 7. fare at most the maximum, if one is set
///
/// Rating and fare text are only parsed when their threshold is active and
/// every earlier check passed; a non-numeric value there is an error.
pub fn matches(trip: &TripRecord, query: &Query) -> Result<bool, DomainError> {
    if !query.origin.is_empty() && !trip.departs_from(&query.origin) {
        return Ok(false);
    }
    if !query.destination.is_empty() && !trip.arrives_at(&query.destination) {
        return Ok(false);
    }
    if !trip.runs_on(query.weekday) {
        return Ok(false);
    }
    if query.ac_only && !trip.is_air_conditioned() {
        return Ok(false);
    }
    if query.sleeper_only && !trip.is_sleeper() {
        return Ok(false);
    }
    if let Some(min_rating) = query.min_rating {
        if trip.rating()? < min_rating {
            return Ok(false);
        }
    }
    if let Some(max_fare) = query.max_fare {
        if trip.fare()? > max_fare {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Keep the trips that match a query, preserving their order.
pub fn filter_trips(
    trips: &[Arc<TripRecord>],
    query: &Query,
) -> Result<Vec<Arc<TripRecord>>, DomainError> {
    let mut kept = Vec::new();
    for trip in trips {
        if matches(trip, query)? {
            kept.push(Arc::clone(trip));
        }
    }
    Ok(kept)
}
