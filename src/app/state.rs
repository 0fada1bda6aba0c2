//! Defines the central, mutable state of the application.

use crate::config::AppConfig;
use crate::core::{FileRecord, FileRegistry, UploadSession};
use crate::utils::file_detection::FileKind;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Holds the complete, mutable state of the application.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` so command handlers and the
/// upload task can share it. Every command runs to completion under the lock.
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// The canonical, ordered list of uploaded files.
    pub registry: FileRegistry,
    /// The registry filtered by `search_query` and `kind_filter`.
    pub filtered_files: Vec<FileRecord>,
    /// The current text in the search box.
    pub search_query: String,
    /// The folder-style kind filter, if one is selected.
    pub kind_filter: Option<FileKind>,
    /// Staged files and progress of the simulated upload.
    pub upload: UploadSession,
    /// A handle to the running upload ticker, allowing it to be aborted.
    pub upload_task: Option<JoinHandle<()>>,
    /// A flag used to signal cancellation to the upload ticker.
    pub upload_cancellation_flag: Arc<AtomicBool>,
    /// One-line status shown under the grid.
    pub status_message: String,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            registry: FileRegistry::new(),
            filtered_files: Vec::new(),
            search_query: String::new(),
            kind_filter: None,
            upload: UploadSession::new(),
            upload_task: None,
            upload_cancellation_flag: Arc::new(AtomicBool::new(false)),
            status_message: "Ready.".to_string(),
        }
    }

    /// Cancels the running upload, if any. Staged files are kept.
    pub fn cancel_current_upload(&mut self) {
        self.upload_cancellation_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.upload_task.take() {
            handle.abort();
        }

        if self.upload.cancel() {
            tracing::info!("Upload cancelled.");
            self.status_message = "Upload cancelled.".to_string();
        } else {
            tracing::warn!("cancel_current_upload called, but no upload was running.");
        }
    }
}
