//! Quill Domain - Core types
//!
//! This crate defines the domain model for the Quill API client: payloads
//! and the case conversion that bridges the `snake_case` backend with
//! `camelCase` application code, plus request, response and resource types.
//! All types here are pure Rust with no I/O dependencies.

pub mod casing;
pub mod convert;
pub mod credential;
pub mod error;
pub mod mirror;
pub mod payload;
pub mod request;
pub mod resources;
pub mod response;
pub mod settings;

pub use casing::{KeyCase, to_camel_case, to_snake_case};
pub use convert::{CaseConverter, CollisionPolicy, denormalize, normalize};
pub use credential::Credential;
pub use error::{DomainError, DomainResult};
pub use mirror::{CaseMirror, from_mirror, normalize_record};
pub use payload::{Blob, FileHandle, FormField, FormPayload, FormValue, Mapping, Payload, Protected};
pub use request::{ApiRequest, HttpMethod, RequestBody, query_pairs};
pub use resources::{
    Author, AuthorRecord, Category, CategoryRecord, MediaFile, MediaFileRecord, NewTag,
    NewTagRecord, Post, PostPage, PostPageRecord, PostQuery, PostRecord, PostStatus, SyncRun,
    SyncRunRecord, SyncState, Tag, TagRecord,
};
pub use response::{ApiResponse, ResponseBody, StatusCode, is_json_media_type};
pub use settings::ClientSettings;
