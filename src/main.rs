use anyhow::{Context, Result};
use clap::Parser;
use sharecloudly::app::{self, events::UserEvent, state::AppState};
use sharecloudly::config;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Headless file manager: reads JSON commands from stdin, one per line, and
/// writes JSON events to stdout.
#[derive(Parser, Debug)]
#[command(name = "sharecloudly", version, about)]
struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the event stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::settings::load_config(cli.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Could not load config ({}). Using defaults.", e);
        config::AppConfig::default()
    });

    let state = Arc::new(Mutex::new(AppState::new(config)));
    let (event_tx, event_rx) = mpsc::unbounded_channel::<UserEvent>();

    let writer = tokio::spawn(app::bridge::write_events(event_rx, tokio::io::stdout()));

    tracing::info!("Application initialized. Waiting for commands on stdin.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        app::handle_ipc_message(&line, event_tx.clone(), state.clone()).await;
    }

    // Let a running upload finish before shutting down.
    let pending_upload = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.")
        .upload_task
        .take();
    if let Some(handle) = pending_upload {
        tracing::info!("Input closed; waiting for the running upload to finish.");
        handle.await.ok();
    }

    drop(event_tx);
    writer.await.context("Event writer task failed")?;
    tracing::info!("Shutting down.");
    Ok(())
}
