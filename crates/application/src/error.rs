//! Application error types

use livetest_domain::DomainError;
use thiserror::Error;

use crate::ports::ConnectionError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation or assertion error occurred.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The live connection failed.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),
}

impl ApplicationError {
    /// Returns the domain error, if this is one.
    #[must_use]
    pub const fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Connection(_) => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
