//! Request body types

use crate::payload::{Blob, FormPayload, Payload};

/// Body of an outgoing API request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// Structured data, sent as JSON. Subject to key denormalization.
    Json(Payload),
    /// Multipart form upload, sent untouched.
    Multipart(FormPayload),
    /// Raw binary upload, sent untouched.
    Binary(Blob),
}

impl RequestBody {
    /// Returns true if there is nothing to send.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the structured payload, if any.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Payload> {
        match self {
            Self::Json(payload) => Some(payload),
            _ => None,
        }
    }

    /// Fixed content type for bodies that have one.
    ///
    /// Multipart bodies return `None`: the boundary is chosen by the transport.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None | Self::Multipart(_) => None,
            Self::Json(_) => Some("application/json"),
            Self::Binary(blob) => Some(&blob.content_type),
        }
    }
}
