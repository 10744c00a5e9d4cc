//! Transformable payloads.
//!
//! A [`Payload`] is the closed set of shapes the case converter understands:
//! primitives, ordered sequences, keyed mappings and protected opaque values.
//! Protected values sit behind an [`Arc`] so transformations can hand back
//! the very same value instead of a copy.

mod protected;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use protected::{Blob, FileHandle, FormField, FormPayload, FormValue, Protected};

use crate::error::{DomainError, DomainResult};

/// Keyed mapping with stable insertion order.
pub type Mapping = IndexMap<String, Payload>;

/// A JSON-like value that may also carry protected opaque content.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    /// Absent value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Any JSON number.
    Number(serde_json::Number),
    /// String.
    String(String),
    /// Ordered sequence.
    Array(Vec<Payload>),
    /// Keyed mapping.
    Object(Mapping),
    /// Opaque value, shared by reference.
    Protected(Arc<Protected>),
}

impl Payload {
    /// Builds an object from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wraps binary content.
    #[must_use]
    pub fn blob(blob: Blob) -> Self {
        Self::Protected(Arc::new(Protected::Blob(blob)))
    }

    /// Wraps a file handle.
    #[must_use]
    pub fn file(file: FileHandle) -> Self {
        Self::Protected(Arc::new(Protected::File(file)))
    }

    /// Wraps a timestamp.
    #[must_use]
    pub fn timestamp(at: DateTime<Utc>) -> Self {
        Self::Protected(Arc::new(Protected::Timestamp(at)))
    }

    /// Wraps a multipart form.
    #[must_use]
    pub fn form(form: FormPayload) -> Self {
        Self::Protected(Arc::new(Protected::Form(form)))
    }

    /// Looks up a key on an object. Returns `None` for anything else.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Returns the mapping if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Mapping> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the shared opaque value if this is protected.
    #[must_use]
    pub const fn protected(&self) -> Option<&Arc<Protected>> {
        match self {
            Self::Protected(inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns true for `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts a typed value into a payload through its serde representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Serialization` if `value` cannot be represented
    /// as JSON.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> DomainResult<Self> {
        serde_json::to_value(value)
            .map(Self::from)
            .map_err(DomainError::from)
    }

    /// Deserializes this payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Serialization` if the payload holds binary
    /// content or does not match the shape of `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> DomainResult<T> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<Self>> for Payload {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => serializer.collect_seq(items),
            Self::Object(map) => serializer.collect_map(map),
            Self::Protected(inner) => inner.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PayloadVisitor)
    }
}

/// Builds payloads straight from the input so object keys keep their order.
struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = Payload;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Payload, E> {
        Ok(Payload::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Payload, E> {
        Ok(Payload::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Payload, D::Error> {
        Payload::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Payload, E> {
        Ok(Payload::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Payload, E> {
        Ok(Payload::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Payload, E> {
        Ok(Payload::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Payload, E> {
        Ok(serde_json::Number::from_f64(v).map_or(Payload::Null, Payload::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Payload, E> {
        Ok(Payload::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Payload, E> {
        Ok(Payload::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Payload, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Payload::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Payload, A::Error> {
        let mut entries = Mapping::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Payload>()? {
            entries.insert(key, value);
        }
        Ok(Payload::Object(entries))
    }
}
