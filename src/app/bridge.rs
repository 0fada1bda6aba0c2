//! The stdout side of the JSON-lines bridge.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;

use super::events::UserEvent;

/// Writes each event as one JSON line until the channel closes or the
/// output stops accepting data.
pub async fn write_events<W>(mut events: UnboundedReceiver<UserEvent>, mut out: W)
where
    W: AsyncWrite + Unpin,
{
    while let Some(event) = events.recv().await {
        let mut line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to serialize event: {}", e);
                continue;
            }
        };
        line.push('\n');
        if let Err(e) = out.write_all(line.as_bytes()).await {
            tracing::error!("Failed to write event: {}", e);
            break;
        }
        if let Err(e) = out.flush().await {
            tracing::error!("Failed to flush events: {}", e);
            break;
        }
    }
}
