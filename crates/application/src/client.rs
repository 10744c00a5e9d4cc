//! The API client.
//!
//! [`ApiClient`] resolves paths against the configured base URL, runs the
//! interceptor chain around the transport and decodes typed results. It is
//! constructed explicitly and passed to whoever needs it.

use std::sync::Arc;

use quill_domain::{ApiRequest, ApiResponse, ClientSettings, Payload};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;

use crate::error::{ApplicationError, ApplicationResult};
use crate::interceptor::{AuthInterceptor, CaseInterceptor, Interceptor, InterceptorChain};
use crate::ports::{CredentialStore, HttpTransport};

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Client for the content backend.
pub struct ApiClient<T> {
    settings: ClientSettings,
    transport: Arc<T>,
    interceptors: InterceptorChain,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            transport: Arc::clone(&self.transport),
            interceptors: self.interceptors.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("settings", &self.settings)
            .field("interceptors", &self.interceptors)
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a client without interceptors.
    #[must_use]
    pub fn new(settings: ClientSettings, transport: Arc<T>) -> Self {
        Self {
            settings,
            transport,
            interceptors: InterceptorChain::new(),
        }
    }

    /// Creates a client with the auth and case interceptors registered.
    ///
    /// Auth runs first on the way out and last on the way back, so it sees
    /// the response status after the body has been normalized.
    #[must_use]
    pub fn standard(
        settings: ClientSettings,
        transport: Arc<T>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let case = CaseInterceptor::with_policy(settings.collision_policy);
        Self::new(settings, transport)
            .with_interceptor(Arc::new(AuthInterceptor::new(store)))
            .with_interceptor(Arc::new(case))
    }

    /// Registers an interceptor after the existing ones.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// The settings the client was built with.
    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The registered interceptors.
    #[must_use]
    pub const fn interceptors(&self) -> &InterceptorChain {
        &self.interceptors
    }

    /// Sends a request through the interceptors and the transport.
    ///
    /// Any status is returned as a response; use the typed helpers to turn
    /// error statuses into errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not resolve or the transport fails.
    pub async fn send(&self, request: ApiRequest) -> ApplicationResult<ApiResponse> {
        let span = tracing::debug_span!(
            "api_request",
            id = %request.id,
            method = %request.method,
            path = %request.path,
        );

        async move {
            let url = self.settings.endpoint(&request.path)?;
            let request_id = request.id.to_string();
            let request = self
                .interceptors
                .request(request)
                .await
                .with_header(REQUEST_ID_HEADER, request_id);

            let response = self.transport.send(url, request).await?;
            tracing::debug!(status = %response.status, "response received");

            Ok(self.interceptors.response(response).await)
        }
        .instrument(span)
        .await
    }

    /// Sends a request and decodes the body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Status` for a non-2xx status, or a domain
    /// error if the body does not fit `R`.
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> ApplicationResult<R> {
        let response = ensure_success(self.send(request).await?)?;
        Ok(response.json()?)
    }

    /// GET `path` with query pairs.
    ///
    /// # Errors
    ///
    /// See [`Self::send_json`].
    pub async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApplicationResult<R> {
        self.send_json(ApiRequest::get(path).with_query(query.iter().cloned()))
            .await
    }

    /// POST a serializable body to `path`.
    ///
    /// # Errors
    ///
    /// See [`Self::send_json`].
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> ApplicationResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = Payload::from_serializable(body)?;
        self.send_json(ApiRequest::post(path).with_json(payload)).await
    }

    /// PUT a serializable body to `path`.
    ///
    /// # Errors
    ///
    /// See [`Self::send_json`].
    pub async fn put_json<B, R>(&self, path: &str, body: &B) -> ApplicationResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = Payload::from_serializable(body)?;
        self.send_json(ApiRequest::put(path).with_json(payload)).await
    }

    /// PATCH `path` with a serializable body.
    ///
    /// # Errors
    ///
    /// See [`Self::send_json`].
    pub async fn patch_json<B, R>(&self, path: &str, body: &B) -> ApplicationResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = Payload::from_serializable(body)?;
        self.send_json(ApiRequest::patch(path).with_json(payload)).await
    }

    /// DELETE `path`, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Status` for a non-2xx status.
    pub async fn delete(&self, path: &str) -> ApplicationResult<()> {
        ensure_success(self.send(ApiRequest::delete(path)).await?)?;
        Ok(())
    }
}

/// Turns a non-2xx response into `ApplicationError::Status`.
///
/// The message is the `detail` or `message` field of a decoded body, or the
/// reason phrase.
///
/// # Errors
///
/// Returns `ApplicationError::Status` when the status is not a success.
pub fn ensure_success(response: ApiResponse) -> ApplicationResult<ApiResponse> {
    if response.status.is_success() {
        return Ok(response);
    }

    let message = response
        .payload()
        .and_then(|p| {
            ["detail", "message"]
                .iter()
                .find_map(|key| p.get(key).and_then(Payload::as_str))
        })
        .map_or_else(|| response.status.reason_phrase().to_string(), str::to_string);

    Err(ApplicationError::Status {
        status: response.status,
        message,
    })
}
