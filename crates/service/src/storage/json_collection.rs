use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::errors::ServiceError;

const EMPTY_COLLECTION: &[u8] = b"[]";

/// Create the file holding an empty JSON array if it does not exist yet.
pub async fn ensure_seeded(path: &Path) -> Result<(), ServiceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    match fs::metadata(path).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            fs::write(path, EMPTY_COLLECTION).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Read a JSON array of records. An empty (or whitespace-only) file reads as `[]`.
pub async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ServiceError> {
    let bytes = fs::read(path).await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| ServiceError::Storage(format!("{}: {}", path.display(), e)))
}

/// Write the pretty-printed collection to the sibling `.tmp` file of `path`.
/// The target itself is untouched until [`commit_staged`].
pub async fn stage_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(items)?;
    fs::write(tmp_path(path), data).await?;
    Ok(())
}

/// Rename the staged `.tmp` file over `path`.
pub async fn commit_staged(path: &Path) -> Result<(), ServiceError> {
    fs::rename(tmp_path(path), path).await?;
    Ok(())
}

/// Best-effort removal of a staged file that will not be committed.
pub async fn discard_staged(path: &Path) {
    let _ = fs::remove_file(tmp_path(path)).await;
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
