//! Background work: loading picked files and running the simulated upload.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::events::UserEvent;
use super::filtering::apply_filters;
use super::helpers::{lock_state, notify};
use super::proxy::EventProxy;
use super::state::AppState;
use crate::core::{CoreError, FileLoader};

/// Loads the given paths off the async runtime and stages the accepted ones.
pub async fn stage_paths<P: EventProxy>(
    paths: Vec<PathBuf>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let config = lock_state(&state).config.clone();

    let outcome =
        match tokio::task::spawn_blocking(move || FileLoader::load_records(&paths, &config)).await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                let e = CoreError::from(e);
                tracing::error!("File loading task failed: {}", e);
                proxy.send_event(UserEvent::ShowError(e.to_string()));
                return;
            }
        };

    for rejection in &outcome.rejected {
        proxy.send_event(UserEvent::ShowError(rejection.reason.clone()));
    }

    let mut state_guard = lock_state(&state);
    let count = outcome.records.len();
    match state_guard.upload.stage(outcome.records) {
        Ok(()) => {
            tracing::info!("Staged {} files for upload", count);
            state_guard.status_message = format!("{} file(s) ready to upload.", count);
        }
        Err(e) => {
            tracing::warn!("Could not stage files: {}", e);
            proxy.send_event(UserEvent::ShowError(e.to_string()));
        }
    }
    notify(&state_guard, &proxy);
}

/// Starts a simulated upload of everything currently staged.
pub fn start_upload<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let mut state_guard = lock_state(&state);

    if let Err(e) = state_guard.upload.begin() {
        tracing::warn!("Upload not started: {}", e);
        proxy.send_event(UserEvent::ShowError(e.to_string()));
        notify(&state_guard, &proxy);
        return;
    }

    let new_cancel_flag = Arc::new(AtomicBool::new(false));
    state_guard.upload_cancellation_flag = new_cancel_flag.clone();
    state_guard.status_message = "Uploading...".to_string();

    let tick = Duration::from_millis(state_guard.config.upload_tick_ms);
    let step = state_guard.config.upload_step_percent.max(1);
    let completion_delay = Duration::from_millis(state_guard.config.upload_completion_delay_ms);

    tracing::info!(
        "Starting upload of {} files",
        state_guard.upload.staged().len()
    );
    let handle = tokio::spawn(upload_task(
        proxy.clone(),
        state.clone(),
        new_cancel_flag,
        tick,
        step,
        completion_delay,
    ));
    state_guard.upload_task = Some(handle);

    notify(&state_guard, &proxy);
}

/// Ticks progress to 100 percent, waits a moment, then commits the batch.
///
/// Every step re-checks the cancellation flag while holding the state lock, so
/// a cancelled run never reaches the registry.
async fn upload_task<P: EventProxy>(
    proxy: P,
    state: Arc<Mutex<AppState>>,
    cancel_flag: Arc<AtomicBool>,
    tick: Duration,
    step: u8,
    completion_delay: Duration,
) {
    loop {
        tokio::time::sleep(tick).await;

        let percent = {
            let mut state_guard = lock_state(&state);
            if cancel_flag.load(Ordering::SeqCst) {
                tracing::debug!("Upload ticker stopped by cancellation.");
                return;
            }
            match state_guard.upload.advance(step) {
                Ok(percent) => percent,
                Err(e) => {
                    tracing::warn!("Upload ticker found session in wrong state: {}", e);
                    state_guard.upload_task = None;
                    return;
                }
            }
        };

        proxy.send_event(UserEvent::UploadProgress { percent });
        if percent >= 100 {
            break;
        }
    }

    tokio::time::sleep(completion_delay).await;

    let mut state_guard = lock_state(&state);
    if cancel_flag.load(Ordering::SeqCst) {
        return;
    }
    state_guard.upload_task = None;

    // Refuse before finishing the run so a bad batch stays staged.
    if let Err(e) = state_guard.registry.check_batch(state_guard.upload.staged()) {
        tracing::error!("Uploaded batch was rejected by the registry: {}", e);
        if let Err(transition) = state_guard.upload.fail() {
            tracing::warn!("Upload could not be marked as failed: {}", transition);
        }
        state_guard.status_message = "Upload failed.".to_string();
        proxy.send_event(UserEvent::ShowError(e.to_string()));
        notify(&state_guard, &proxy);
        return;
    }

    let batch = match state_guard.upload.complete() {
        Ok(batch) => batch,
        Err(e) => {
            tracing::warn!("Upload could not complete: {}", e);
            return;
        }
    };
    let count = batch.len();

    // The whole batch lands under this one lock.
    match state_guard.registry.add_batch(batch) {
        Ok(()) => {
            apply_filters(&mut state_guard);
            state_guard.status_message = format!("Uploaded {} file(s).", count);
            proxy.send_event(UserEvent::Toast("Files uploaded successfully".to_string()));
        }
        Err(e) => {
            tracing::error!("Registry refused an already checked batch: {}", e);
            proxy.send_event(UserEvent::ShowError(e.to_string()));
        }
    }
    notify(&state_guard, &proxy);
}
