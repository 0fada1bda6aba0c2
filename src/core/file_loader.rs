//! Turns files picked by the user into `FileRecord`s ready for staging.

use super::{ContentHandle, CoreError, FileRecord};
use crate::config::AppConfig;
use crate::utils::file_detection::{detect_mime_type, is_accepted};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A path that could not be turned into a record, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of loading many paths at once.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Accepted records, in the order their paths were given.
    pub records: Vec<FileRecord>,
    pub rejected: Vec<Rejection>,
}

pub struct FileLoader;

impl FileLoader {
    /// Loads every path in parallel. Order of accepted records follows `paths`.
    pub fn load_records(paths: &[PathBuf], config: &AppConfig) -> LoadOutcome {
        let results: Vec<Result<FileRecord, CoreError>> = paths
            .par_iter()
            .map(|path| Self::load_record(path, config))
            .collect();

        let mut outcome = LoadOutcome::default();
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(record) => outcome.records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    outcome.rejected.push(Rejection {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        tracing::info!(
            "Loaded {} records ({} rejected)",
            outcome.records.len(),
            outcome.rejected.len()
        );
        outcome
    }

    /// Reads one file's metadata, classifies it and builds its record.
    pub fn load_record(path: &Path, config: &AppConfig) -> Result<FileRecord, CoreError> {
        let metadata = fs::metadata(path).map_err(|e| CoreError::Io(e, path.to_path_buf()))?;
        if !metadata.is_file() {
            return Err(CoreError::Io(
                std::io::Error::other("not a regular file"),
                path.to_path_buf(),
            ));
        }

        let mime_type = detect_mime_type(path);
        if !is_accepted(&config.accepted_types, &mime_type) {
            return Err(CoreError::UnsupportedType {
                path: path.to_path_buf(),
                mime_type,
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let last_modified = metadata
            .modified()
            .map(|t| DateTime::<Utc>::from(t).timestamp_millis())
            .unwrap_or_else(|_| Utc::now().timestamp_millis());

        let mut record = FileRecord::new(name, mime_type, metadata.len())
            .with_last_modified(last_modified)
            .with_content(ContentHandle::File(path.to_path_buf()));

        if record.is_image() && metadata.len() <= preview_limit_bytes(config) {
            let bytes = fs::read(path).map_err(|e| CoreError::Io(e, path.to_path_buf()))?;
            let preview = data_uri(&record.mime_type, &bytes);
            record = record.with_preview(preview);
        }

        tracing::debug!(
            "Built record {} for {} ({})",
            record.id,
            path.display(),
            record.mime_type
        );
        Ok(record)
    }

    /// Builds a record for bytes that never touched the file system.
    pub fn record_from_bytes(
        name: &str,
        bytes: Vec<u8>,
        config: &AppConfig,
    ) -> Result<FileRecord, CoreError> {
        let mime_type = mime_guess::from_path(name)
            .first_raw()
            .map(str::to_string)
            .unwrap_or_else(|| tree_magic_mini::from_u8(&bytes).to_string());

        if !is_accepted(&config.accepted_types, &mime_type) {
            return Err(CoreError::UnsupportedType {
                path: PathBuf::from(name),
                mime_type,
            });
        }

        let size = bytes.len() as u64;
        let mut record = FileRecord::new(name, mime_type, size);
        if record.is_image() && size <= preview_limit_bytes(config) {
            let preview = data_uri(&record.mime_type, &bytes);
            record = record.with_preview(preview);
        }
        Ok(record.with_content(ContentHandle::Memory(Arc::from(bytes))))
    }
}

fn preview_limit_bytes(config: &AppConfig) -> u64 {
    config.max_preview_size_mb.saturating_mul(1024 * 1024)
}

/// `data:{mime};base64,{payload}`.
fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}
