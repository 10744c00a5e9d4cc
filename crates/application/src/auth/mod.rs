//! Credential handling for the API client.
//!
//! The bearer credential replaces the browser's auth cookie; the
//! [`crate::interceptor::AuthInterceptor`] attaches it and drops it on 401.

mod memory_store;

pub use memory_store::{CredentialStatus, MemoryCredentialStore};
