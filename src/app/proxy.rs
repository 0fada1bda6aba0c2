//! Defines an abstraction over the event sending mechanism.

use super::events::UserEvent;
use tokio::sync::mpsc::UnboundedSender;

/// A trait that abstracts the sending of user events.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}

/// The binary forwards events through an unbounded channel to its stdout writer.
impl EventProxy for UnboundedSender<UserEvent> {
    fn send_event(&self, event: UserEvent) {
        // A closed receiver means the frontend is gone; log and move on.
        if let Err(e) = self.send(event) {
            tracing::warn!("Failed to send event to frontend: {}", e);
        }
    }
}
