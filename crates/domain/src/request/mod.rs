//! Outgoing API requests.

mod body;
mod method;
mod query;

use std::collections::BTreeMap;

use uuid::Uuid;

pub use body::RequestBody;
pub use method::HttpMethod;
pub use query::query_pairs;

use crate::payload::{Blob, FormPayload, Payload};

/// A request against the backend API.
///
/// `path` is relative to the configured base URL; the client resolves it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Correlation id, sent as `X-Request-Id`.
    pub id: Uuid,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path below the base URL, e.g. `posts/42`.
    pub path: String,
    /// Query parameters in order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Request body.
    pub body: RequestBody,
}

impl ApiRequest {
    /// Creates a request with no body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            path: path.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: RequestBody::None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Appends query parameters.
    #[must_use]
    pub fn with_query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets a structured body.
    #[must_use]
    pub fn with_json(mut self, payload: Payload) -> Self {
        self.body = RequestBody::Json(payload);
        self
    }

    /// Sets a multipart body.
    #[must_use]
    pub fn with_multipart(mut self, form: FormPayload) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Sets a binary body.
    #[must_use]
    pub fn with_binary(mut self, blob: Blob) -> Self {
        self.body = RequestBody::Binary(blob);
        self
    }

    /// Looks up a header by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
