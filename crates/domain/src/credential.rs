//! Bearer credential held by the client.
//!
//! In the browser this lived in a cookie; here it is a small serializable
//! value kept by a credential store.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A bearer credential with optional expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The opaque access token.
    pub access_token: String,
    /// Authorization scheme.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Expiration time (None for credentials without expiry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// When the credential was stored.
    #[serde(default = "Utc::now")]
    pub issued_at: DateTime<Utc>,
}

fn default_scheme() -> String {
    "Bearer".to_string()
}

impl Credential {
    /// Creates a bearer credential without expiry.
    #[must_use]
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            scheme: default_scheme(),
            expires_at: None,
            issued_at: Utc::now(),
        }
    }

    /// Sets the expiry relative to the issue time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidExpiry` if the resulting time is outside
    /// the representable range.
    pub fn expires_in(mut self, seconds: i64) -> DomainResult<Self> {
        let expires_at = TimeDelta::try_seconds(seconds)
            .and_then(|delta| self.issued_at.checked_add_signed(delta))
            .ok_or(DomainError::InvalidExpiry(seconds))?;
        self.expires_at = Some(expires_at);
        Ok(self)
    }

    /// Sets an absolute expiry.
    #[must_use]
    pub const fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Check if the credential is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| exp <= Utc::now())
    }

    /// Seconds until expiry, or None if it never expires.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at
            .map(|exp| (exp - Utc::now()).num_seconds().max(0))
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("{} {}", self.scheme, self.access_token)
    }
}
