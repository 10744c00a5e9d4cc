//! Client settings
//!
//! Built once at startup and handed to the API client.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::convert::CollisionPolicy;
use crate::error::{DomainError, DomainResult};

/// Settings for the API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL every request path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// `User-Agent` header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How the case interceptor treats colliding keys.
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    format!("Quill/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl ClientSettings {
    /// Creates settings for the given base URL, other fields defaulted.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Resolves a request path against the base URL.
    ///
    /// Exactly one slash separates the two, whatever either side carries.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the result does not parse.
    pub fn endpoint(&self, path: &str) -> DomainResult<Url> {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let joined = if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        };
        Url::parse(&joined).map_err(|e| DomainError::InvalidUrl(format!("{e}: {joined}")))
    }

    /// Checks that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSetting` for a non-HTTP base URL or a
    /// zero timeout.
    pub fn validate(&self) -> DomainResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidSetting(format!("base_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidSetting(format!(
                "base_url: unsupported scheme `{}`",
                url.scheme()
            )));
        }
        if self.timeout_ms == 0 {
            return Err(DomainError::InvalidSetting(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
