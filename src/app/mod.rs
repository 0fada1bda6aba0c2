//! The application layer: shared state, IPC command dispatch and background tasks.

pub mod bridge;
pub mod commands;
pub mod events;
pub mod filtering;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod view_model;

use std::sync::{Arc, Mutex};

use events::{IpcMessage, UserEvent};
use proxy::EventProxy;
use state::AppState;

/// Parses one raw IPC message and dispatches it to its command handler.
///
/// Each command runs to completion before this returns, so messages are
/// applied strictly in arrival order. Only the upload ticker outlives it.
pub async fn handle_ipc_message<P: EventProxy>(message: &str, proxy: P, state: Arc<Mutex<AppState>>) {
    let msg = match serde_json::from_str::<IpcMessage>(message) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message '{}': {}", message, e);
            proxy.send_event(UserEvent::ShowError(format!("Malformed message: {}", e)));
            return;
        }
    };

    tracing::debug!("IPC command: {}", msg.command);
    match msg.command.as_str() {
        "initialize" => commands::initialize(proxy, state),
        "stageFiles" => commands::stage_files(msg.payload, proxy, state).await,
        "stageContent" => commands::stage_content(msg.payload, proxy, state),
        "unstageFile" => commands::unstage_file(msg.payload, proxy, state),
        "startUpload" => commands::start_upload(proxy, state),
        "cancelUpload" => commands::cancel_upload(proxy, state),
        "deleteFile" => commands::delete_file(msg.payload, proxy, state),
        "search" => commands::search(msg.payload, proxy, state),
        "filterKind" => commands::filter_kind(msg.payload, proxy, state),
        "shareFile" => commands::share_file(msg.payload, proxy, state),
        "getPreview" => commands::get_preview(msg.payload, proxy, state),
        "downloadFile" => commands::download_file(msg.payload, proxy, state).await,
        unknown => tracing::warn!("Unknown IPC command: {}", unknown),
    }
}
