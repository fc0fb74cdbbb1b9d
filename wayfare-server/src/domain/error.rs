//! Domain error types.
//!
//! These errors describe catalog rows that break the record contract:
//! a column the row does not have, or numeric text that is not a number.
//! Malformed time and duration text is not an error; it is normalized to a
//! fallback value instead.

/// Domain-level errors for trip record validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// The source row has no value for a required column
    #[error("record is missing column `{0}`")]
    MissingField(&'static str),

    /// A numeric column holds text that does not parse as a number
    #[error("column `{column}` holds non-numeric value {value:?}")]
    NonNumeric { column: &'static str, value: String },
}
