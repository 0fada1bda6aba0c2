//! Defines the custom error type for the `core` module.

use super::FileId;
use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// This enum encapsulates all possible errors that can occur while loading,
/// registering, uploading and sharing file records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An id that is already present was inserted again. This is a defect in
    /// id generation, not a user-facing condition.
    #[error("Duplicate file id: {0}")]
    DuplicateId(FileId),

    /// Represents an I/O error, typically from file system operations.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// The file's type is not on the accept list.
    #[error("Unsupported file type '{mime_type}' for {path}")]
    UnsupportedType { path: PathBuf, mime_type: String },

    /// No record with this id exists.
    #[error("No file with id {0}")]
    NotFound(FileId),

    /// The record exists but carries no readable content.
    #[error("File {0} has no content available for download")]
    ContentUnavailable(FileId),

    /// A staging or upload operation was attempted while a run is in progress.
    #[error("An upload is already in progress")]
    UploadInProgress,

    /// An upload was started with an empty staging list.
    #[error("There are no files staged for upload")]
    NothingStaged,

    /// The upload session was driven out of order (e.g. completing an idle session).
    #[error("Invalid upload transition from {0}")]
    InvalidTransition(&'static str),

    /// Represents an error that occurred when a Tokio task was joined.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
