//! Application error types

use quill_domain::{DomainError, StatusCode};
use thiserror::Error;

use crate::ports::{CredentialError, TransportError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation or serialization error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Error detail from the body, or the reason phrase.
        message: String,
    },

    /// The credential store failed.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),
}

impl ApplicationError {
    /// The response status, for errors that carry one.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
