//! File-backed persistence for settings and credentials.

mod credential_file;
mod settings_repository;

pub use credential_file::FileCredentialStore;
pub use settings_repository::{
    BASE_URL_ENV, SettingsError, SettingsRepository, TIMEOUT_ENV, apply_overrides,
};
