use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use xxhash_rust::xxh3::xxh3_64;

use crate::error::EngineError;

/// Prefix of the staging file created next to the target.
pub const TEMP_PREFIX: &str = ".annotr-tmp-";

/// Hash used to detect a file changing between read and write.
pub fn content_hash(bytes: &[u8]) -> u64 {
    xxh3_64(bytes)
}

/// Replace `path` with `content` without ever exposing a partial file.
///
/// The content is staged in a temporary file in the target's directory, synced,
/// given the target's permissions, then renamed over it. When `expected_hash`
/// is set and the file on disk no longer matches it, nothing is written. On
/// any failure the staging file is removed and the target is untouched.
pub fn write_atomic(path: &Path, content: &str, expected_hash: Option<u64>) -> Result<(), EngineError> {
    let write_failed = |source: std::io::Error| EngineError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(expected) = expected_hash {
        let current = fs::read(path).map_err(|source| EngineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content_hash(&current) != expected {
            return Err(EngineError::ConcurrentModification {
                path: path.to_path_buf(),
            });
        }
    }

    let dir = staging_dir(path);
    let mut staged = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(&dir)
        .map_err(write_failed)?;

    staged.write_all(content.as_bytes()).map_err(write_failed)?;
    staged.as_file().sync_all().map_err(write_failed)?;

    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(staged.path(), meta.permissions()).map_err(write_failed)?;
    }

    // Dropping the PersistError removes the staging file.
    staged.persist(path).map_err(|e| write_failed(e.error))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "file written");
    Ok(())
}

fn staging_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
