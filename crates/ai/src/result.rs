use thiserror::Error;

use meditrack_core::DomainError;

/// Result type used by the analytics subsystem.
pub type AiResult<T> = Result<T, AiError>;

/// Failure kinds surfaced by analytics operations.
///
/// Every public operation returns one of these instead of panicking; the HTTP
/// boundary maps them onto status codes via [`AiError::kind`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AiError {
    /// Malformed or missing input (unparsable dates, missing fields, empty sets).
    #[error("data error: {0}")]
    Data(String),

    /// `predict` was called before any successful `train`.
    #[error("model not trained yet")]
    ModelNotTrained,

    /// The numeric fit could not be completed (collinear features, non-finite values).
    #[error("numeric fit failed: {0}")]
    NumericFit(String),
}

impl AiError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn numeric(msg: impl Into<String>) -> Self {
        Self::NumericFit(msg.into())
    }

    /// Stable machine-readable code for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AiError::Data(_) => "data_error",
            AiError::ModelNotTrained => "model_not_trained",
            AiError::NumericFit(_) => "numeric_fit_error",
        }
    }
}

impl From<DomainError> for AiError {
    fn from(value: DomainError) -> Self {
        AiError::Data(value.to_string())
    }
}
