//! Atomic package file output.
//!
//! Implements atomic writes using:
//! 1. Write to a temp file in the destination directory
//! 2. fsync to ensure data reaches disk
//! 3. Atomic rename over the target path
//!
//! A failure at any step leaves the destination as it was and removes the
//! temp file.

use crate::config::PackageConfig;
use crate::error::{ExportError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Write a package to `path` atomically, producing it with `write`.
///
/// `write` receives the temp file; nothing is visible at `path` unless it
/// returns `Ok` and the rename succeeds.
pub fn atomic_write_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| ExportError::io_with_path(e, parent))?;
    }

    let mut temp = tempfile::Builder::new()
        .prefix(".customcar-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| ExportError::io_with_path(e, parent))?;

    // Dropping `temp` on an early return deletes it.
    write(temp.as_file_mut())?;
    sync(&mut temp)?;

    temp.persist(path).map_err(|e| {
        let temp_path = e.file.path().to_path_buf();
        if let Err(cleanup) = e.file.close() {
            warn!("Failed to remove temp file {}: {}", temp_path.display(), cleanup);
        }
        ExportError::io_with_path(e.error, path)
    })?;

    debug!("Atomically wrote {}", path.display());
    Ok(())
}

/// Give `path` the package file extension when it has none.
pub fn with_package_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(PackageConfig::FILE_EXTENSION)
    }
}

fn sync(temp: &mut NamedTempFile) -> Result<()> {
    let temp_path = temp.path().to_path_buf();
    temp.as_file_mut()
        .flush()
        .map_err(|e| ExportError::io_with_path(e, &temp_path))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| ExportError::io_with_path(e, &temp_path))
}
