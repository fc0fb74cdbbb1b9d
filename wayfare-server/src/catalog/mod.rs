//! Trip catalog: the full record set a session searches over.
//!
//! The catalog is read once from a CSV file whose header row names the
//! columns in [`crate::domain::column`]. Each data row becomes one
//! [`TripRecord`], shared behind `Arc` with every result set built from it.

mod error;
mod loader;

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::domain::TripRecord;

pub use error::CatalogError;
pub use loader::read_rows;

/// The immutable set of trips loaded at start-up.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    trips: Vec<Arc<TripRecord>>,
}

impl Catalog {
    /// Create a catalog from already-built records.
    pub fn new(trips: impl IntoIterator<Item = TripRecord>) -> Self {
        Self {
            trips: trips.into_iter().map(Arc::new).collect(),
        }
    }

    /// Create an empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a catalog from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        loader::load_path(path.as_ref())
    }

    /// Load a catalog from any CSV source.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, CatalogError> {
        loader::load_reader(reader)
    }

    /// All trips, in file order.
    pub fn trips(&self) -> &[Arc<TripRecord>] {
        &self.trips
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the catalog has no trips.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Distinct departure points, sorted.
    pub fn origins(&self) -> Vec<String> {
        self.distinct(|t| &t.departure_point)
    }

    /// Distinct arrival points, sorted.
    pub fn destinations(&self) -> Vec<String> {
        self.distinct(|t| &t.arrival_point)
    }

    /// Distinct non-empty operator names, sorted.
    pub fn operators(&self) -> Vec<String> {
        self.distinct(|t| &t.operator_name)
            .into_iter()
            .filter(|name| !name.is_empty())
            .collect()
    }

    fn distinct(&self, field: impl Fn(&TripRecord) -> &String) -> Vec<String> {
        self.trips
            .iter()
            .map(|t| field(t.as_ref()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }
}
