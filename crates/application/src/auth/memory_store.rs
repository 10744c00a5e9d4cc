//! In-memory credential storage with expiry tracking.

use std::sync::Arc;

use async_trait::async_trait;
use quill_domain::Credential;
use tokio::sync::RwLock;

use crate::ports::{CredentialError, CredentialStore};

/// Thread-safe in-memory credential store.
///
/// Clones share the same slot, so a credential cleared by the auth
/// interceptor is gone for every holder.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<RwLock<Option<Credential>>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `credential`.
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(credential))),
        }
    }

    /// Get the credential status for display.
    pub async fn status(&self) -> CredentialStatus {
        CredentialStatus::of(self.slot.read().await.as_ref())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, CredentialError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        *self.slot.write().await = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        self.slot.write().await.take();
        Ok(())
    }
}

/// Status of a stored credential for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    /// Nothing is stored.
    Missing,
    /// The credential is usable.
    Valid {
        /// Seconds until expiry, or None if no expiry.
        seconds_remaining: Option<i64>,
    },
    /// The credential has expired.
    Expired,
}

impl CredentialStatus {
    /// Status of an optional credential.
    #[must_use]
    pub fn of(credential: Option<&Credential>) -> Self {
        match credential {
            None => Self::Missing,
            Some(c) if c.is_expired() => Self::Expired,
            Some(c) => Self::Valid {
                seconds_remaining: c.seconds_until_expiry(),
            },
        }
    }

    /// Returns true if a request would be authenticated.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Missing => "Not logged in".to_string(),
            Self::Valid {
                seconds_remaining: Some(secs),
            } => {
                if *secs > 3600 {
                    format!("Logged in for {} more hours", secs / 3600)
                } else if *secs > 60 {
                    format!("Logged in for {} more minutes", secs / 60)
                } else {
                    format!("Logged in for {secs} more seconds")
                }
            }
            Self::Valid {
                seconds_remaining: None,
            } => "Logged in (no expiry)".to_string(),
            Self::Expired => "Session expired".to_string(),
        }
    }
}
