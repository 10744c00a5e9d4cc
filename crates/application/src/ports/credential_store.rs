//! Credential store port
//!
//! Defines the interface for keeping the bearer credential between calls.

use async_trait::async_trait;
use quill_domain::Credential;

/// Errors that can occur during credential storage.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No location to keep the credential in.
    #[error("no credential location available")]
    NoLocation,
}

/// Storage for the single bearer credential of the client.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the stored credential, expired or not.
    async fn load(&self) -> Result<Option<Credential>, CredentialError>;

    /// Replaces the stored credential.
    async fn save(&self, credential: &Credential) -> Result<(), CredentialError>;

    /// Removes the stored credential. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), CredentialError>;

    /// Loads the credential if it has not expired.
    async fn valid(&self) -> Result<Option<Credential>, CredentialError> {
        Ok(self.load().await?.filter(|c| !c.is_expired()))
    }
}
