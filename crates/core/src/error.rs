//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic input failures (validation, missing
/// fields, unparsable dates). Numeric and model-state failures belong to the
/// analytics layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. out-of-range or negative input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A required field was absent from a record.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A date string could not be parsed into a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }
}
