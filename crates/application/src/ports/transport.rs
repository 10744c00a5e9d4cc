//! HTTP transport port

use std::future::Future;

use quill_domain::{ApiRequest, ApiResponse};
use thiserror::Error;
use url::Url;

/// Errors raised before a response was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The URL was rejected by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for sending requests to the backend.
///
/// Implementations only move bytes: key conversion, credentials and status
/// handling happen in the client's interceptors.
pub trait HttpTransport: Send + Sync {
    /// Sends `request` to `url` and returns the raw response.
    ///
    /// `url` is already resolved against the base URL; the request's query
    /// pairs still have to be appended.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    fn send(
        &self,
        url: Url,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}
