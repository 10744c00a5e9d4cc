//! Opaque values the case converter never looks inside.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer, ser::Error as _};

/// A protected, opaque value.
///
/// The set is closed: the converter recognises these by variant, never by
/// inspecting their contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protected {
    /// Raw binary content.
    Blob(Blob),
    /// A named file, typically bound for an upload.
    File(FileHandle),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// A multipart form body.
    Form(FormPayload),
}

impl Protected {
    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Blob(_) => "blob",
            Self::File(_) => "file",
            Self::Timestamp(_) => "timestamp",
            Self::Form(_) => "form",
        }
    }
}

impl Serialize for Protected {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Timestamp(at) => {
                serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            other => Err(S::Error::custom(format!(
                "{} content cannot be encoded as JSON",
                other.kind()
            ))),
        }
    }
}

/// Binary content with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Media type, e.g. `image/png`.
    pub content_type: String,
    /// The raw bytes.
    pub bytes: Vec<u8>,
}

impl Blob {
    /// Creates a blob.
    #[must_use]
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the blob holds no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A file with a name and optional media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// File name sent with the upload.
    pub file_name: String,
    /// Media type, guessed from the name when absent.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl FileHandle {
    /// Creates a file handle without an explicit media type.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Sets the media type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A single multipart field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Plain text field.
    Text(String),
    /// File part.
    File(FileHandle),
}

/// A named multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Field name. Sent as-is, never case-converted.
    pub name: String,
    /// Field value.
    pub value: FormValue,
}

/// A multipart form body, fields in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    /// The fields.
    pub fields: Vec<FormField>,
}

impl FormPayload {
    /// Creates an empty form.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: FormValue::Text(value.into()),
        });
        self
    }

    /// Appends a file field.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: FileHandle) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: FormValue::File(file),
        });
        self
    }
}
