//! Compile-time mirror of the case conversion.
//!
//! [`CaseMirror::Mirror`] names the `camelCase` counterpart of a wire type:
//! the type that [`normalize`](crate::convert::normalize) output deserializes
//! into. Primitives and protected types mirror to themselves, containers
//! mirror element-wise, and records declared with [`wire_record!`] get a
//! generated mirror struct whose keys serde renames to `camelCase`.
//!
//! Serde's `camelCase` rename agrees with [`to_camel_case`] for every field
//! name that has no underscore directly before a digit. Field names like
//! `item_2` must not be used in wire records.
//!
//! [`to_camel_case`]: crate::casing::to_camel_case

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::convert::{denormalize, normalize};
use crate::error::DomainResult;
use crate::payload::{Blob, FileHandle, FormPayload, Payload};

/// Maps a `snake_case` wire type to its `camelCase` application type.
pub trait CaseMirror {
    /// The mirrored type.
    type Mirror;
}

macro_rules! mirror_as_self {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CaseMirror for $ty {
                type Mirror = Self;
            }
        )*
    };
}

mirror_as_self!(
    bool,
    i32,
    i64,
    u32,
    u64,
    f64,
    String,
    Payload,
    Blob,
    FileHandle,
    FormPayload,
    DateTime<Utc>,
);

impl<T: CaseMirror> CaseMirror for Vec<T> {
    type Mirror = Vec<T::Mirror>;
}

impl<T: CaseMirror> CaseMirror for Option<T> {
    type Mirror = Option<T::Mirror>;
}

impl<V: CaseMirror> CaseMirror for BTreeMap<String, V> {
    type Mirror = BTreeMap<String, V::Mirror>;
}

/// Declares a wire record together with its `camelCase` mirror.
///
/// ```ignore
/// wire_record! {
///     /// A tag as stored by the backend.
///     pub struct TagRecord => Tag {
///         /// Identifier.
///         pub id: String,
///         /// Number of posts.
///         pub post_count: u64,
///     }
/// }
/// ```
///
/// expands to `TagRecord` (serialized with the field names as written),
/// `Tag` (serialized as `postCount`), and `impl CaseMirror for TagRecord`.
/// Field types are mirrored through `CaseMirror`, so a `Vec<TagRecord>`
/// field becomes `Vec<Tag>` on the mirror side.
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        pub struct $wire:ident => $mirror:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident: $ty:ty,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $wire {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $mirror {
            $(
                $(#[$field_meta])*
                pub $field: <$ty as $crate::mirror::CaseMirror>::Mirror,
            )*
        }

        impl $crate::mirror::CaseMirror for $wire {
            type Mirror = $mirror;
        }
    };
}

pub(crate) use wire_record;

/// Runs a typed wire record through [`normalize`] and reads back its mirror.
///
/// # Errors
///
/// Returns `DomainError::Serialization` if the record cannot be encoded or
/// the normalized shape does not fit `T::Mirror`.
pub fn normalize_record<T>(record: &T) -> DomainResult<T::Mirror>
where
    T: CaseMirror + Serialize,
    T::Mirror: DeserializeOwned,
{
    normalize(&Payload::from_serializable(record)?).deserialize_into()
}

/// Runs a mirror value through [`denormalize`] and reads back the wire record.
///
/// # Errors
///
/// Same as [`normalize_record`].
pub fn from_mirror<T>(mirror: &T::Mirror) -> DomainResult<T>
where
    T: CaseMirror + DeserializeOwned,
    T::Mirror: Serialize,
{
    denormalize(&Payload::from_serializable(mirror)?).deserialize_into()
}
