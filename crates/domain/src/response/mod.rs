//! Incoming API responses.

mod status;

use std::collections::HashMap;

use serde::de::DeserializeOwned;

pub use status::StatusCode;

use crate::error::{DomainError, DomainResult};
use crate::payload::Payload;

/// Body of a response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Bytes exactly as received.
    Raw(Vec<u8>),
    /// Decoded structured data.
    Json(Payload),
}

impl Default for ResponseBody {
    fn default() -> Self {
        Self::Raw(Vec::new())
    }
}

/// A response from the backend API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers; names are lowercase.
    pub headers: HashMap<String, String>,
    /// Body, raw until an interceptor decodes it.
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Creates a response with a raw body.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status: status.into(),
            headers,
            body: ResponseBody::Raw(body),
        }
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `Content-Type` header, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns true if the content type announces JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(is_json_media_type)
    }

    /// The decoded payload, if an interceptor decoded one.
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        match &self.body {
            ResponseBody::Json(payload) => Some(payload),
            ResponseBody::Raw(_) => None,
        }
    }

    /// Size of a raw body in bytes, `None` once decoded.
    #[must_use]
    pub const fn raw_len(&self) -> Option<usize> {
        match &self.body {
            ResponseBody::Raw(bytes) => Some(bytes.len()),
            ResponseBody::Json(_) => None,
        }
    }

    /// Deserializes the body into `T`.
    ///
    /// Works on both decoded and raw bodies, so a body the interceptor could
    /// not decode surfaces its parse error here.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Serialization` if the body is not valid JSON or
    /// does not fit `T`.
    pub fn json<T: DeserializeOwned>(&self) -> DomainResult<T> {
        match &self.body {
            ResponseBody::Json(payload) => payload.deserialize_into(),
            ResponseBody::Raw(bytes) => serde_json::from_slice(bytes).map_err(DomainError::from),
        }
    }
}

/// Returns true for `application/json` and `+json` structured suffixes.
#[must_use]
pub fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(content_type: &str, body: &str) -> ApiResponse {
        let headers = HashMap::from([("content-type".to_string(), content_type.to_string())]);
        ApiResponse::new(200_u16, headers, body.as_bytes().to_vec())
    }

    #[test]
    fn test_json_media_types() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("application/json; charset=utf-8"));
        assert!(is_json_media_type("application/problem+json"));
        assert!(!is_json_media_type("text/html"));
        assert!(!is_json_media_type("application/octet-stream"));
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let r = response("application/json", "{}");
        assert_eq!(r.header("Content-Type"), Some("application/json"));
        assert!(r.is_json());
    }

    #[test]
    fn test_json_from_raw_body() {
        let r = response("application/json", r#"{"name":"x"}"#);
        let value: serde_json::Value = r.json().unwrap();
        assert_eq!(value["name"], "x");
        assert_eq!(r.raw_len(), Some(12));
    }

    #[test]
    fn test_json_reports_malformed_body() {
        let r = response("application/json", "{not json");
        let err = r.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, DomainError::Serialization(_)));
    }

    #[test]
    fn test_payload_only_after_decoding() {
        let mut r = response("application/json", "{}");
        assert!(r.payload().is_none());
        r.body = ResponseBody::Json(Payload::Null);
        assert_eq!(r.payload(), Some(&Payload::Null));
    }
}
