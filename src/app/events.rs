//! Defines the event and message structures for communication between the backend and frontend.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::view_model::UiState;
use crate::core::FileId;

/// Everything the share dialog needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareInfo {
    pub file_id: FileId,
    pub file_name: String,
    pub link: String,
    pub qr_code_url: String,
}

/// Events sent from the Rust backend to the frontend.
///
/// Serialized as `{ "event": <name>, "payload": ... }`.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum UserEvent {
    /// A complete state update to re-render the UI.
    StateUpdate(Box<UiState>),
    /// A progress tick of the simulated upload.
    UploadProgress { percent: u8 },
    /// Link and QR code for the share dialog.
    ShowShare(ShareInfo),
    /// The inline image for one card, sent on request.
    #[serde(rename_all = "camelCase")]
    Preview { file_id: FileId, data_uri: String },
    /// A file was written to the download directory.
    DownloadComplete { path: PathBuf },
    /// A short, transient notification.
    Toast(String),
    /// An error message to be displayed to the user.
    ShowError(String),
}

/// A message received from the frontend.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
