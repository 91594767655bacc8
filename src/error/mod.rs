//! Error handling for the matching service and its stores.

use std::io;
use std::time::Duration;

use crate::verification::VerificationError;

/// Errors raised by donor and patient-request stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A store read did not complete within the configured bound
    #[error("Store read timed out after {0:?}")]
    Timeout(Duration),

    /// A record addressed by id does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record, e.g. "donor"
        entity: &'static str,
        /// Identifier as rendered by the caller
        id: String,
    },

    /// IO failure while loading or persisting store content
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed store content
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Well-formed content holding a record that breaks a field rule
    #[error("Invalid {entity} {id}: {reason}")]
    InvalidRecord {
        /// Kind of record
        entity: &'static str,
        /// Identifier of the offending record
        id: String,
        /// Rule that failed
        reason: String,
    },
}

/// Specialized error type for LifeLink operations
#[derive(Debug, thiserror::Error)]
pub enum LifeLinkError {
    /// Input is not one of the eight canonical blood type symbols
    #[error("Invalid blood type: {0:?}")]
    InvalidBloodType(String),

    /// The donor store read failed or timed out
    #[error("Donor store temporarily unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// Rejected input on registration or request submission
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// E-mail verification failure
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl LifeLinkError {
    /// Whether the failure was caused by the caller's input rather than a dependency
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::StoreUnavailable(_))
    }

    /// HTTP status class for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidBloodType(_) | Self::ValidationError(_) => 400,
            Self::NotFound(_) => 404,
            Self::Verification(VerificationError::TooManyAttempts) => 429,
            Self::Verification(_) => 400,
            Self::StoreUnavailable(_) => 503,
        }
    }

    /// Convert a store failure, keeping missing records distinct from outages
    #[must_use]
    pub fn from_store(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { entity, id } => Self::NotFound(format!("{entity} {id}")),
            other => Self::StoreUnavailable(other),
        }
    }
}

/// Result type for LifeLink operations
pub type Result<T> = std::result::Result<T, LifeLinkError>;
