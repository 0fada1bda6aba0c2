pub mod download;
pub mod error;
pub mod file_loader;
pub mod registry;
pub mod search;
pub mod share;
pub mod upload;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub use error::CoreError;
pub use file_loader::{FileLoader, LoadOutcome, Rejection};
pub use registry::FileRegistry;
pub use search::{SearchEngine, SearchFilter};
pub use share::ShareLinks;
pub use upload::{UploadSession, UploadState};

use crate::utils::file_detection::FileKind;

/// Opaque identifier of a `FileRecord`.
///
/// Ids are assigned once when a record is created and are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Generates a fresh id (UUID v4 in its 32 hex char "simple" form).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FileId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Where the bytes behind a record can be read from.
#[derive(Clone, PartialEq, Eq)]
pub enum ContentHandle {
    /// The record was loaded from a file on disk.
    File(PathBuf),
    /// The bytes are held in memory.
    Memory(Arc<[u8]>),
}

impl fmt::Debug for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
        }
    }
}

/// One tracked file entry.
///
/// Records are immutable once created. The only way to get rid of one is
/// `FileRegistry::remove`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: FileId,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Modification time in epoch milliseconds.
    pub last_modified: i64,
    /// Inline `data:` URI, only ever set for `image/*` records. Shared so
    /// filtered views and cards don't copy the payload.
    #[serde(skip)]
    pub preview: Option<Arc<str>>,
    #[serde(skip)]
    pub content: Option<ContentHandle>,
}

impl FileRecord {
    /// Creates a record with a freshly generated id and no preview or content.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: FileId::generate(),
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            last_modified: Utc::now().timestamp_millis(),
            preview: None,
            content: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<FileId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_last_modified(mut self, epoch_millis: i64) -> Self {
        self.last_modified = epoch_millis;
        self
    }

    /// Attaches a preview. Ignored for records that are not images.
    pub fn with_preview(mut self, data_uri: impl Into<String>) -> Self {
        if self.is_image() {
            self.preview = Some(Arc::from(data_uri.into()));
        }
        self
    }

    pub fn with_content(mut self, content: ContentHandle) -> Self {
        self.content = Some(content);
        self
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.mime_type)
    }

    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_modified)
    }
}
