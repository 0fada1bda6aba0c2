//! Contains all the command handlers that are callable from the frontend via IPC.
//!
//! Each function in this module corresponds to a specific `IpcMessage::command`.
//! These handlers are responsible for interacting with the `AppState` and the `core`
//! logic, and for sending `UserEvent`s back to the UI.

use super::events::{ShareInfo, UserEvent};
use super::filtering;
use super::helpers::{lock_state, notify, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks;
use crate::core::{download, CoreError, FileId, FileLoader, ShareLinks};
use crate::utils::file_detection::FileKind;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Deserialize)]
struct IdPayload {
    id: String,
}

#[derive(Deserialize)]
struct PathsPayload {
    paths: Vec<PathBuf>,
}

/// A file handed over inline, e.g. dropped into the page.
#[derive(Deserialize)]
struct ContentPayload {
    name: String,
    /// Base64 of the file's bytes.
    data: String,
}

#[derive(Deserialize)]
struct SearchPayload {
    #[serde(default)]
    query: String,
}

#[derive(Deserialize)]
struct KindPayload {
    #[serde(default)]
    kind: Option<FileKind>,
}

/// Deserializes a payload, reporting malformed input to the UI instead of failing.
fn parse_payload<T, P>(command: &str, payload: serde_json::Value, proxy: &P) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    P: EventProxy,
{
    match serde_json::from_value::<T>(payload) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Invalid payload for '{}': {}", command, e);
            proxy.send_event(UserEvent::ShowError(format!(
                "Invalid request '{}': {}",
                command, e
            )));
            None
        }
    }
}

/// Handles the initial request for state from the frontend when it loads.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, filtering::apply_filters);
}

/// Loads the picked files and adds them to the staging list.
pub async fn stage_files<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if let Some(PathsPayload { paths }) = parse_payload("stageFiles", payload, &proxy) {
        tasks::stage_paths(paths, proxy, state).await;
    }
}

/// Stages a file whose bytes arrive inline instead of as a path.
pub fn stage_content<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(ContentPayload { name, data }) = parse_payload("stageContent", payload, &proxy) else {
        return;
    };

    let bytes = match STANDARD.decode(data.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("stageContent: '{}' is not valid base64: {}", name, e);
            proxy.send_event(UserEvent::ShowError(format!(
                "Could not read '{}': {}",
                name, e
            )));
            return;
        }
    };

    with_state_and_notify(&state, &proxy, |s| {
        let staged = FileLoader::record_from_bytes(&name, bytes, &s.config)
            .and_then(|record| s.upload.stage(vec![record]));
        match staged {
            Ok(()) => {
                tracing::info!("Staged '{}' from inline content", name);
                s.status_message = format!("{} file(s) ready to upload.", s.upload.staged().len());
            }
            Err(e) => {
                tracing::warn!("Could not stage '{}': {}", name, e);
                proxy.send_event(UserEvent::ShowError(e.to_string()));
            }
        }
    });
}

/// Removes one file from the staging list.
pub fn unstage_file<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if let Some(IdPayload { id }) = parse_payload("unstageFile", payload, &proxy) {
        with_state_and_notify(&state, &proxy, |s| match s.upload.unstage(&id) {
            Ok(Some(record)) => tracing::info!("Unstaged '{}'", record.name),
            Ok(None) => tracing::debug!("unstageFile: {} was not staged", id),
            Err(e) => proxy.send_event(UserEvent::ShowError(e.to_string())),
        });
    }
}

pub fn start_upload<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    tasks::start_upload(proxy, state);
}

pub fn cancel_upload<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        tracing::info!("IPC 'cancelUpload' received.");
        s.cancel_current_upload();
    });
}

/// Deletes a file from the registry. Unknown ids are ignored.
pub fn delete_file<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if let Some(IdPayload { id }) = parse_payload("deleteFile", payload, &proxy) {
        with_state_and_notify(&state, &proxy, |s| {
            match s.registry.remove(&id) {
                Some(record) => s.status_message = format!("Deleted '{}'.", record.name),
                None => tracing::debug!("deleteFile: {} not found, nothing to do", id),
            }
            filtering::apply_filters(s);
        });
    }
}

/// Updates the search query and re-filters. Called on every keystroke.
pub fn search<P: EventProxy>(payload: serde_json::Value, proxy: P, state: Arc<Mutex<AppState>>) {
    if let Some(SearchPayload { query }) = parse_payload("search", payload, &proxy) {
        with_state_and_notify(&state, &proxy, |s| {
            s.search_query = query;
            filtering::apply_filters(s);
        });
    }
}

/// Selects (or clears, with `null`) the kind filter.
pub fn filter_kind<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if let Some(KindPayload { kind }) = parse_payload("filterKind", payload, &proxy) {
        with_state_and_notify(&state, &proxy, |s| {
            s.kind_filter = kind;
            filtering::apply_filters(s);
        });
    }
}

/// Builds the share link and QR code URL for a file.
pub fn share_file<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(IdPayload { id }) = parse_payload("shareFile", payload, &proxy) else {
        return;
    };

    let state_guard = lock_state(&state);
    let Some(record) = state_guard.registry.get(&id) else {
        let e = CoreError::NotFound(FileId::from(id));
        tracing::warn!("shareFile: {}", e);
        proxy.send_event(UserEvent::ShowError(e.to_string()));
        return;
    };

    let links = ShareLinks::from_config(&state_guard.config);
    let link = links.share_link(&record.id);
    let info = ShareInfo {
        file_id: record.id.clone(),
        file_name: record.name.clone(),
        qr_code_url: links.qr_code_url(&link),
        link,
    };
    tracing::info!("Sharing '{}' as {}", info.file_name, info.link);
    proxy.send_event(UserEvent::ShowShare(info));
}

/// Sends the inline image for one card.
pub fn get_preview<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(IdPayload { id }) = parse_payload("getPreview", payload, &proxy) else {
        return;
    };

    let state_guard = lock_state(&state);
    match state_guard.registry.get(&id) {
        Some(record) => match &record.preview {
            Some(data_uri) => proxy.send_event(UserEvent::Preview {
                file_id: record.id.clone(),
                data_uri: data_uri.to_string(),
            }),
            None => {
                tracing::debug!("getPreview: '{}' has no preview", record.name);
                proxy.send_event(UserEvent::ShowError(format!(
                    "No preview for '{}'",
                    record.name
                )));
            }
        },
        None => {
            let e = CoreError::NotFound(FileId::from(id));
            tracing::warn!("getPreview: {}", e);
            proxy.send_event(UserEvent::ShowError(e.to_string()));
        }
    }
}

/// Copies a file's content into the download directory.
pub async fn download_file<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(IdPayload { id }) = parse_payload("downloadFile", payload, &proxy) else {
        return;
    };

    let lookup = {
        let state_guard = lock_state(&state);
        let record = state_guard.registry.get(&id).cloned();
        record.map(|r| (r, state_guard.config.download_directory.clone()))
    };

    let (record, directory) = match lookup {
        Some((record, Some(directory))) => (record, directory),
        Some((_, None)) => {
            proxy.send_event(UserEvent::ShowError(
                "No download directory is configured".to_string(),
            ));
            return;
        }
        None => {
            let e = CoreError::NotFound(FileId::from(id));
            proxy.send_event(UserEvent::ShowError(e.to_string()));
            return;
        }
    };

    match download::save_copy(&record, &directory).await {
        Ok(path) => proxy.send_event(UserEvent::DownloadComplete { path }),
        Err(CoreError::ContentUnavailable(_)) => {
            tracing::info!("File not available for download: {}", record.id);
            proxy.send_event(UserEvent::ShowError(
                "File not available for download".to_string(),
            ));
        }
        Err(e) => {
            tracing::warn!("Download of '{}' failed: {}", record.name, e);
            proxy.send_event(UserEvent::ShowError(e.to_string()));
        }
    }

    let state_guard = lock_state(&state);
    notify(&state_guard, &proxy);
}
