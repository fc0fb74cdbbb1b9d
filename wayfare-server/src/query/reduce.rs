//! Narrowing a result set down to its single best trip.

use std::sync::Arc;

use crate::domain::{DomainError, TripRecord};

/// Which trip a reduction keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// The lowest fare.
    Cheapest,
    /// The shortest travel time.
    Fastest,
}

impl Reduction {
    /// Apply this reduction to a result set.
    pub fn apply(self, trips: &[Arc<TripRecord>]) -> Result<Option<Arc<TripRecord>>, DomainError> {
        match self {
            Reduction::Cheapest => cheapest(trips),
            Reduction::Fastest => Ok(fastest(trips)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Reduction::Cheapest => "cheapest",
            Reduction::Fastest => "fastest",
        }
    }
}

/// The trip with the lowest fare; the first one wins a tie.
///
/// Empty input gives `None`. Every fare is checked, so a non-numeric fare
/// anywhere in the set is an error.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use wayfare_server::domain::TripRecord;
/// use wayfare_server::query::cheapest;
///
/// let trip = |bus: &str, fare: &str| Arc::new(TripRecord {
///     bus_number: bus.into(),
///     fare: fare.into(),
///     ..Default::default()
/// });
///
/// let trips = vec![trip("A", "500"), trip("B", "300"), trip("C", "300")];
/// assert_eq!(cheapest(&trips).unwrap().unwrap().bus_number, "B");
/// assert_eq!(cheapest(&[]).unwrap(), None);
/// ```
pub fn cheapest(trips: &[Arc<TripRecord>]) -> Result<Option<Arc<TripRecord>>, DomainError> {
    let mut best: Option<(i64, &Arc<TripRecord>)> = None;
    for trip in trips {
        let fare = trip.fare()?;
        match best {
            Some((lowest, _)) if lowest <= fare => {}
            _ => best = Some((fare, trip)),
        }
    }
    Ok(best.map(|(_, trip)| Arc::clone(trip)))
}

/// The trip with the shortest travel time; the first one wins a tie.
///
/// Unparsable durations count as the sentinel, so they are only chosen
/// when every duration is unparsable.
pub fn fastest(trips: &[Arc<TripRecord>]) -> Option<Arc<TripRecord>> {
    // min_by_key returns the first of equal minima
    trips
        .iter()
        .min_by_key(|t| t.duration_minutes().value())
        .cloned()
}
