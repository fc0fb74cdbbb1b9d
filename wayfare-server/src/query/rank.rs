//! Result ranking.
//!
//! Orders matching trips by a single sort key. Every sort is stable, so
//! trips that compare equal keep the order they were filtered in.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::{DomainError, TripRecord};

use super::SortKey;

/// Sort trips by the given key.
///
/// - [`SortKey::Fare`]: cheapest first
/// - [`SortKey::Timing`]: earliest departure first; unparsable times count
///   as midnight
/// - [`SortKey::Rating`]: highest rated first
/// - [`SortKey::Duration`]: shortest first; unparsable durations go last
///
/// With no key the input order is returned unchanged. Fare and rating keys
/// fail if any trip holds non-numeric text in that column.
pub fn rank_trips(
    trips: Vec<Arc<TripRecord>>,
    sort: Option<SortKey>,
) -> Result<Vec<Arc<TripRecord>>, DomainError> {
    let Some(sort) = sort else {
        return Ok(trips);
    };

    let ranked = match sort {
        SortKey::Fare => sort_by_key(trips, |t| t.fare(), |a, b| a.cmp(b))?,
        SortKey::Timing => sort_by_key(trips, |t| Ok(t.departure().value()), |a, b| a.cmp(b))?,
        // Descending. Adding zero folds -0.0 into 0.0 so equal ratings tie.
        SortKey::Rating => sort_by_key(trips, |t| t.rating().map(|r| r + 0.0), |a, b| {
            b.total_cmp(a)
        })?,
        SortKey::Duration => sort_by_key(
            trips,
            |t| Ok(t.duration_minutes().value()),
            |a, b| a.cmp(b),
        )?,
    };

    Ok(ranked)
}

/// Extract every key up front so a bad field fails before anything moves,
/// then stable-sort on the extracted keys.
fn sort_by_key<K>(
    trips: Vec<Arc<TripRecord>>,
    key: impl Fn(&TripRecord) -> Result<K, DomainError>,
    compare: impl Fn(&K, &K) -> Ordering,
) -> Result<Vec<Arc<TripRecord>>, DomainError> {
    let mut keyed = trips
        .into_iter()
        .map(|trip| Ok((key(trip.as_ref())?, trip)))
        .collect::<Result<Vec<_>, DomainError>>()?;

    keyed.sort_by(|(a, _), (b, _)| compare(a, b));

    Ok(keyed.into_iter().map(|(_, trip)| trip).collect())
}
