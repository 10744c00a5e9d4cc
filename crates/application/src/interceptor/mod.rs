//! Request/response interceptors.
//!
//! Every request leaving the client and every response coming back passes
//! through an [`InterceptorChain`]. Interceptors rewrite the message and hand
//! it on; they never fail, so a misbehaving hook can only log.

mod auth;
mod case;

use std::sync::Arc;

use async_trait::async_trait;
use quill_domain::{ApiRequest, ApiResponse};

pub use auth::AuthInterceptor;
pub use case::CaseInterceptor;

/// A hook around the transport.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrites an outgoing request.
    async fn on_request(&self, request: ApiRequest) -> ApiRequest {
        request
    }

    /// Rewrites an incoming response.
    async fn on_response(&self, response: ApiResponse) -> ApiResponse {
        response
    }
}

/// Ordered list of interceptors.
///
/// Request hooks run in registration order, response hooks in reverse, so
/// the first interceptor registered sees the request first and the response
/// last.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interceptor.
    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Number of registered interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Returns true if no interceptor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Runs all request hooks.
    pub async fn request(&self, mut request: ApiRequest) -> ApiRequest {
        for interceptor in &self.interceptors {
            request = interceptor.on_request(request).await;
        }
        request
    }

    /// Runs all response hooks, last registered first.
    pub async fn response(&self, mut response: ApiResponse) -> ApiResponse {
        for interceptor in self.interceptors.iter().rev() {
            response = interceptor.on_response(response).await;
        }
        response
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("interceptors", &self.names())
            .finish()
    }
}
