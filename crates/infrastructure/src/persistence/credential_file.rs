//! File-based credential store.
//!
//! The credential lives in the platform config directory:
//! - Linux: ~/.config/quill/credentials.json
//! - macOS: ~/Library/Application Support/quill/credentials.json
//! - Windows: %APPDATA%/quill/credentials.json

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quill_application::ports::{CredentialError, CredentialStore};
use quill_domain::Credential;
use tokio::fs;

use super::settings_repository::config_dir;
use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::NoLocation` if there is no config directory.
    pub fn default_location() -> Result<Self, CredentialError> {
        config_dir()
            .map(|dir| Self::new(dir.join("credentials.json")))
            .ok_or(CredentialError::NoLocation)
    }

    /// The file the credential is kept in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, CredentialError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        from_json_bytes(&content)
            .map(Some)
            .map_err(|e| CredentialError::Serialization(e.to_string()))
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(credential)
            .map_err(|e| CredentialError::Serialization(e.to_string()))?;
        write_private(&self.path, &content).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Writes the token file readable by the owner only.
///
/// The file is created with mode 0600, and an existing file is narrowed to
/// 0600 before the new token is written into it.
#[cfg(unix)]
async fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    use tokio::io::AsyncWriteExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .await?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))
        .await?;
    file.write_all(content).await?;
    file.flush().await
}

#[cfg(not(unix))]
async fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    fs::write(path, content).await
}
