//! Quill Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestTransport;
pub use persistence::{
    BASE_URL_ENV, FileCredentialStore, SettingsError, SettingsRepository, TIMEOUT_ENV,
    apply_overrides,
};
pub use serialization::{
    SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
