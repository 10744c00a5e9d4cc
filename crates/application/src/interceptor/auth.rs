//! Bearer credential handling.

use std::sync::Arc;

use async_trait::async_trait;
use quill_domain::{ApiRequest, ApiResponse};

use super::Interceptor;
use crate::ports::CredentialStore;

/// Attaches the stored bearer credential and drops it when the backend
/// answers 401.
#[derive(Clone)]
pub struct AuthInterceptor {
    store: Arc<dyn CredentialStore>,
}

impl AuthInterceptor {
    /// Creates an interceptor backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for AuthInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthInterceptor").finish_non_exhaustive()
    }
}

#[async_trait]
impl Interceptor for AuthInterceptor {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn on_request(&self, request: ApiRequest) -> ApiRequest {
        if request.header("authorization").is_some() {
            return request;
        }
        match self.store.valid().await {
            Ok(Some(credential)) => request.with_header("Authorization", credential.authorization()),
            Ok(None) => request,
            Err(err) => {
                tracing::warn!(error = %err, "could not read credential");
                request
            }
        }
    }

    async fn on_response(&self, response: ApiResponse) -> ApiResponse {
        if response.status.is_unauthorized() {
            match self.store.clear().await {
                Ok(()) => tracing::info!("backend rejected the credential, cleared it"),
                Err(err) => tracing::warn!(error = %err, "could not clear rejected credential"),
            }
        }
        response
    }
}
