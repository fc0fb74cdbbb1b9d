//! Catalog loading error types.

use crate::domain::DomainError;

/// Errors that can occur while loading the trip catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be opened or read
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not well-formed CSV
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A data row does not satisfy the record contract
    #[error("row {row}: {source}")]
    Record { row: usize, source: DomainError },
}

impl CatalogError {
    /// Whether the catalog file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
