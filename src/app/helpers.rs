//! Contains helper functions to reduce boilerplate code in other `app` modules.

use std::sync::{Arc, Mutex, MutexGuard};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_ui_state;

/// Locks the shared state.
pub fn lock_state(state: &Arc<Mutex<AppState>>) -> MutexGuard<'_, AppState> {
    state
        .lock()
        .expect("Mutex was poisoned. This should not happen.")
}

/// Sends a fresh `StateUpdate` built from an already locked state.
pub fn notify<P: EventProxy>(state: &AppState, proxy: &P) {
    let ui_state = generate_ui_state(state);
    proxy.send_event(UserEvent::StateUpdate(Box::new(ui_state)));
}

/// Locks the `AppState`, performs a mutation, and then automatically sends a
/// `StateUpdate` event to the UI.
pub fn with_state_and_notify<F, P: EventProxy>(
    state: &Arc<Mutex<AppState>>,
    proxy: &P,
    update_fn: F,
) where
    F: FnOnce(&mut AppState),
{
    let mut state_guard = lock_state(state);
    update_fn(&mut state_guard);
    notify(&state_guard, proxy);
}
