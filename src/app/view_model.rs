//! Responsible for transforming the `AppState` into a `UiState` view model.
//!
//! This module acts as a presentation layer, preparing data specifically for
//! consumption by the UI: file cards with human-readable sizes and icons, the
//! upload panel and the empty-state message.

use serde::Serialize;

use super::state::AppState;
use crate::core::{FileId, FileRecord, UploadState};
use crate::utils::file_detection::FileKind;
use crate::utils::format::{format_size, format_timestamp};

const EMPTY_REGISTRY_MESSAGE: &str = "No files yet. Upload some files to get started.";
const NO_MATCHES_MESSAGE: &str = "No files match your search.";

/// A serializable representation of the application state for the UI.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub cards: Vec<FileCard>,
    pub total_files: usize,
    pub visible_files_count: usize,
    pub search_query: String,
    pub kind_filter: Option<FileKind>,
    /// Shown instead of the grid when there are no cards.
    pub empty_message: Option<String>,
    pub upload: UploadPanel,
    pub status_message: String,
}

/// One card in the file grid.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileCard {
    pub id: FileId,
    pub name: String,
    pub size_label: String,
    pub kind: FileKind,
    pub icon: &'static str,
    /// The image itself is fetched with `getPreview`.
    pub has_preview: bool,
    pub modified_label: String,
    pub downloadable: bool,
}

impl From<&FileRecord> for FileCard {
    fn from(record: &FileRecord) -> Self {
        let kind = record.kind();
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            size_label: format_size(record.size_bytes),
            kind,
            icon: kind.icon_name(),
            has_preview: record.preview.is_some(),
            modified_label: format_timestamp(record.last_modified_at()),
            downloadable: record.content.is_some(),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StagedFile {
    pub id: FileId,
    pub name: String,
}

/// The uploader dialog.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadPanel {
    pub state: UploadState,
    pub percent: u8,
    pub staged: Vec<StagedFile>,
    /// `None` while nothing is staged or a run is in progress.
    pub button_label: Option<String>,
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let cards: Vec<FileCard> = state.filtered_files.iter().map(FileCard::from).collect();

    let empty_message = if !cards.is_empty() {
        None
    } else if state.registry.is_empty() {
        Some(EMPTY_REGISTRY_MESSAGE.to_string())
    } else {
        Some(NO_MATCHES_MESSAGE.to_string())
    };

    UiState {
        visible_files_count: cards.len(),
        cards,
        total_files: state.registry.len(),
        search_query: state.search_query.clone(),
        kind_filter: state.kind_filter,
        empty_message,
        upload: upload_panel(state),
        status_message: state.status_message.clone(),
    }
}

fn upload_panel(state: &AppState) -> UploadPanel {
    let upload_state = state.upload.state();
    let staged: Vec<StagedFile> = state
        .upload
        .staged()
        .iter()
        .map(|r| StagedFile {
            id: r.id.clone(),
            name: r.name.clone(),
        })
        .collect();

    let button_label = if staged.is_empty() || upload_state.is_in_progress() {
        None
    } else {
        Some(upload_button_label(staged.len()))
    };

    UploadPanel {
        state: upload_state,
        percent: upload_state.percent(),
        staged,
        button_label,
    }
}

/// "Upload 1 file", "Upload 3 files".
pub fn upload_button_label(count: usize) -> String {
    format!("Upload {} file{}", count, if count == 1 { "" } else { "s" })
}
