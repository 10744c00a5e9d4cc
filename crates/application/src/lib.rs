//! Quill Application - Client core
//!
//! This crate wires the domain types into a working API client: the
//! interceptor chain that converts key case and handles the bearer
//! credential, the [`ApiClient`] itself, and the typed content use cases.
//! I/O happens behind the ports in [`ports`].

pub mod auth;
pub mod client;
pub mod error;
pub mod interceptor;
pub mod ports;
pub mod use_cases;

pub use auth::{CredentialStatus, MemoryCredentialStore};
pub use client::{ApiClient, REQUEST_ID_HEADER, ensure_success};
pub use error::{ApplicationError, ApplicationResult};
pub use interceptor::{AuthInterceptor, CaseInterceptor, Interceptor, InterceptorChain};
pub use ports::{CredentialError, CredentialStore, HttpTransport, TransportError};
pub use use_cases::ContentService;
