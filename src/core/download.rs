//! Writes a record's content to the download directory.

use super::{ContentHandle, CoreError, FileRecord};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Copies the record's bytes into `directory` under the record's name.
///
/// An existing file is never overwritten; `name (1).ext`, `name (2).ext`, ...
/// are tried instead.
pub async fn save_copy(record: &FileRecord, directory: &Path) -> Result<PathBuf, CoreError> {
    let content = record
        .content
        .as_ref()
        .ok_or_else(|| CoreError::ContentUnavailable(record.id.clone()))?;

    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|e| CoreError::Io(e, directory.to_path_buf()))?;

    let target = available_path(directory, &record.name).await;
    match content {
        ContentHandle::File(source) => copy_file(source, &target).await?,
        ContentHandle::Memory(bytes) => {
            tokio::fs::write(&target, bytes)
                .await
                .map_err(|e| CoreError::Io(e, target.clone()))?;
        }
    }

    tracing::info!("Downloaded '{}' to {}", record.name, target.display());
    Ok(target)
}

/// Copies `source` to `target`, blaming whichever side failed.
async fn copy_file(source: &Path, target: &Path) -> Result<(), CoreError> {
    let mut reader = tokio::fs::File::open(source)
        .await
        .map_err(|e| CoreError::Io(e, source.to_path_buf()))?;
    let mut writer = tokio::fs::File::create(target)
        .await
        .map_err(|e| CoreError::Io(e, target.to_path_buf()))?;

    tokio::io::copy(&mut reader, &mut writer)
        .await
        .map_err(|e| CoreError::Io(e, target.to_path_buf()))?;
    writer
        .flush()
        .await
        .map_err(|e| CoreError::Io(e, target.to_path_buf()))
}

async fn available_path(directory: &Path, name: &str) -> PathBuf {
    // Strip any directory components a name might smuggle in.
    let file_name = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "download".to_string());

    let candidate = directory.join(&file_name);
    if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
        return candidate;
    }

    let path = Path::new(&file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.clone());
    let extension = path.extension().map(|e| e.to_string_lossy().to_string());

    let mut n = 1;
    loop {
        let numbered = match &extension {
            Some(ext) => format!("{} ({}).{}", stem, n, ext),
            None => format!("{} ({})", stem, n),
        };
        let candidate = directory.join(numbered);
        if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return candidate;
        }
        n += 1;
    }
}
