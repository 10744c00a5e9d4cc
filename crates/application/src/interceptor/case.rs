//! Key case conversion at the transport boundary.

use async_trait::async_trait;
use quill_domain::{
    ApiRequest, ApiResponse, CaseConverter, CollisionPolicy, DomainError, Payload, RequestBody,
    ResponseBody,
};

use super::Interceptor;

/// Denormalizes outgoing JSON bodies and normalizes incoming ones.
///
/// Multipart, binary and empty bodies go out untouched. Responses are only
/// decoded when their content type announces JSON; anything that fails to
/// decode is handed on raw so the caller sees the parse error.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInterceptor {
    converter: CaseConverter,
}

impl CaseInterceptor {
    /// Creates an interceptor with the given converter.
    #[must_use]
    pub const fn new(converter: CaseConverter) -> Self {
        Self { converter }
    }

    /// Creates an interceptor for a collision policy.
    #[must_use]
    pub const fn with_policy(policy: CollisionPolicy) -> Self {
        Self::new(CaseConverter::new(policy))
    }
}

#[async_trait]
impl Interceptor for CaseInterceptor {
    fn name(&self) -> &'static str {
        "case"
    }

    async fn on_request(&self, mut request: ApiRequest) -> ApiRequest {
        let RequestBody::Json(payload) = &request.body else {
            return request;
        };
        match self.converter.denormalize(payload) {
            Ok(converted) => request.body = RequestBody::Json(converted),
            Err(err) => tracing::warn!(
                request_id = %request.id,
                error = %err,
                "request body left unconverted"
            ),
        }
        request
    }

    async fn on_response(&self, mut response: ApiResponse) -> ApiResponse {
        if !response.is_json() {
            return response;
        }
        let ResponseBody::Raw(bytes) = &response.body else {
            return response;
        };
        if bytes.is_empty() {
            return response;
        }

        let payload: Payload = match serde_json::from_slice(bytes) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(error = %err, "response body is not valid JSON, passing through");
                return response;
            }
        };

        match self.converter.normalize(&payload) {
            Ok(converted) => response.body = ResponseBody::Json(converted),
            Err(err @ DomainError::KeyCollision { .. }) => {
                tracing::warn!(error = %err, "response body left unconverted");
                response.body = ResponseBody::Json(payload);
            }
            Err(err) => {
                tracing::debug!(error = %err, "response body left raw");
            }
        }
        response
    }
}
