//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Two distinct keys rewrote to the same key under a strict converter.
    #[error("key collision: `{original}` rewrites to `{key}`, which is already present")]
    KeyCollision {
        /// The rewritten key both inputs map to.
        key: String,
        /// The input key that was processed second.
        original: String,
    },

    /// A payload could not be converted to or from a typed record.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A credential lifetime does not fit the supported date range.
    #[error("token lifetime of {0} seconds is out of range")]
    InvalidExpiry(i64),

    /// A client setting has an invalid value.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
