//! Client settings persistence.
//!
//! Stores client settings in the platform-specific config directory:
//! - Linux/macOS: ~/.config/quill/settings.json
//! - Windows: %APPDATA%/quill/settings.json
//!
//! `QUILL_BASE_URL` and `QUILL_TIMEOUT_MS` override the file.

use std::path::{Path, PathBuf};

use quill_domain::{ClientSettings, DomainError};
use tokio::fs;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "QUILL_BASE_URL";

/// Environment variable overriding the timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "QUILL_TIMEOUT_MS";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// An environment override did not parse.
    #[error("invalid value for {name}: {value}")]
    InvalidOverride {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The resulting settings are unusable.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Returns the Quill config directory.
pub(crate) fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("quill"))
}

/// Repository for client settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository using the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: config_dir().map(|p| p.join("settings.json")),
        }
    }

    /// Creates a repository reading an explicit file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the path where settings are stored, if available.
    #[must_use]
    pub fn settings_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads settings from disk, applies environment overrides and validates.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, an override is malformed,
    /// or the result fails validation.
    pub async fn load(&self) -> Result<ClientSettings, SettingsError> {
        let settings = self.load_file().await?;
        let settings = apply_overrides(settings, |name| std::env::var(name).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads the file alone, without overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_file(&self) -> Result<ClientSettings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(ClientSettings::default());
        };

        if !path.exists() {
            return Ok(ClientSettings::default());
        }

        let content = fs::read(path).await?;
        Ok(from_json_bytes(&content)?)
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no location or the write fails.
    pub async fn save(&self, settings: &ClientSettings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(settings)?;
        fs::write(path, content).await?;

        Ok(())
    }
}

/// Applies environment overrides read through `lookup`.
///
/// # Errors
///
/// Returns `SettingsError::InvalidOverride` for a non-numeric timeout.
pub fn apply_overrides(
    mut settings: ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        settings.base_url = base_url;
    }

    if let Some(value) = lookup(TIMEOUT_ENV) {
        settings.timeout_ms = value
            .trim()
            .parse()
            .map_err(|_| SettingsError::InvalidOverride {
                name: TIMEOUT_ENV,
                value,
            })?;
    }

    Ok(settings)
}
