use crate::core::{ContentHandle, FileRecord};
use std::io;
use std::sync::{Arc, Mutex, Once};

static LOGGING_INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
///
/// This function is wrapped in a `Once` block to ensure that the global
/// subscriber is set exactly one time, even when tests are run in parallel.
pub fn setup_test_logging() {
    LOGGING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok(); // Ignore the error if it's already set by another test harness.
    });
}

/// Builds a record with a fixed id and in-memory content.
pub fn record(id: &str, name: &str, mime_type: &str) -> FileRecord {
    FileRecord::new(name, mime_type, name.len() as u64)
        .with_id(id)
        .with_last_modified(1_700_000_000_000)
        .with_content(ContentHandle::Memory(Arc::from(name.as_bytes())))
}

/// Runs `f` under a thread-local subscriber and returns what it logged.
///
/// Independent of the global subscriber installed by `setup_test_logging`.
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || LogBuffer(sink.clone()))
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
