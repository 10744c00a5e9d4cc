//! HTTP methods the API client sends.

use std::fmt;

/// HTTP method of an API call.
///
/// Only the verbs the backend routes accept are modelled; every variant
/// has a constructor on [`ApiRequest`](super::ApiRequest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read a resource or a listing.
    Get,
    /// Create a resource or trigger an action.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl HttpMethod {
    /// The method token as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
