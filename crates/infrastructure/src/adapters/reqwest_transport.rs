//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. It only moves bytes:
//! bodies arrive already denormalized and responses leave raw.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use quill_application::ports::{HttpTransport, TransportError};
use quill_domain::{ApiRequest, ApiResponse, ClientSettings, FileHandle, FormPayload, FormValue, HttpMethod, RequestBody};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};

/// HTTP transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestTransport {
    /// Creates a transport from client settings.
    ///
    /// Configuration:
    /// - Request timeout: `settings.timeout_ms`
    /// - Follow redirects: up to 10
    /// - User-Agent: `settings.user_agent`
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &ClientSettings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_millis(settings.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: settings.timeout_ms,
        })
    }

    /// Creates a transport with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, timeout_ms: u64) -> Self {
        Self { client, timeout_ms }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Attaches the body to the builder.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: RequestBody,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        match body {
            RequestBody::None => Ok(builder),
            RequestBody::Json(payload) => {
                let bytes = serde_json::to_vec(&payload)
                    .map_err(|e| TransportError::InvalidBody(e.to_string()))?;
                Ok(builder.body(bytes))
            }
            RequestBody::Multipart(form) => Ok(builder.multipart(Self::build_form(form)?)),
            RequestBody::Binary(blob) => Ok(builder.body(blob.bytes)),
        }
    }

    /// Builds a multipart form, keeping field names and order.
    fn build_form(form: FormPayload) -> Result<Form, TransportError> {
        form.fields
            .into_iter()
            .try_fold(Form::new(), |acc, field| match field.value {
                FormValue::Text(text) => Ok(acc.text(field.name, text)),
                FormValue::File(file) => Ok(acc.part(field.name, Self::file_part(file)?)),
            })
    }

    /// Builds a file part, guessing the media type from the name if unset.
    fn file_part(file: FileHandle) -> Result<Part, TransportError> {
        let content_type = file.content_type.unwrap_or_else(|| {
            let guessed: mime::Mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();
            guessed.essence_str().to_string()
        });
        Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&content_type)
            .map_err(|e| TransportError::InvalidBody(format!("{e}: {content_type}")))
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return TransportError::ConnectionFailed(error.to_string());
        }
        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, mut url: Url, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        let start = Instant::now();
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        // Add Content-Type if body has one and not already set
        if request.header("content-type").is_none()
            && let Some(content_type) = request.body.content_type()
        {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        builder = Self::build_body(builder, request.body)?;

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("Failed to read body: {e}")))?
            .to_vec();

        tracing::debug!(
            status,
            bytes = body.len(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "transport round trip"
        );

        Ok(ApiResponse::new(status, headers, body))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quill_domain::{Blob, Payload};

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_with_client_keeps_timeout() {
        let client = Client::builder().build().unwrap();
        let transport = ReqwestTransport::with_client(client, 1_500);
        assert_eq!(transport.timeout_ms, 1_500);
    }

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(&ClientSettings::default());
        assert!(transport.is_ok());
        assert_eq!(transport.unwrap().timeout_ms, 30_000);
    }

    #[test]
    fn test_json_body_with_file_is_rejected() {
        let payload = Payload::object([("upload", Payload::file(FileHandle::new("a.txt", vec![1])))]);
        let builder = Client::new().post("https://example.com");

        let result = ReqwestTransport::build_body(builder, RequestBody::Json(payload));
        assert!(matches!(result, Err(TransportError::InvalidBody(_))));
    }

    #[test]
    fn test_binary_body() {
        let blob = Blob::new("application/pdf", vec![0x25, 0x50]);
        let builder = Client::new().post("https://example.com");

        let request = ReqwestTransport::build_body(builder, RequestBody::Binary(blob))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&[0x25, 0x50][..]));
    }

    #[test]
    fn test_multipart_form_builds() {
        let form = FormPayload::new()
            .text("altText", "cover")
            .file("file", FileHandle::new("cover.png", vec![1, 2, 3]));
        assert!(ReqwestTransport::build_form(form).is_ok());
    }

    #[test]
    fn test_invalid_media_type_is_rejected() {
        let file = FileHandle::new("x.bin", vec![]).with_content_type("not a mime");
        assert!(matches!(
            ReqwestTransport::file_part(file),
            Err(TransportError::InvalidBody(_))
        ));
    }
}
