//! Atomic file writes.
//!
//! The session file and the saved-sets store are rewritten wholesale on every
//! change. Writing through a temp file and renaming it over the target means
//! an interrupted write leaves the previous version intact instead of a
//! truncated JSON document that would later load as "empty".
//!
//! Pattern:
//! 1. Write content to `.{filename}.{pid}.tmp` in the same directory
//! 2. fsync the temp file
//! 3. Rename it over the target
//!
//! Source and destination must be on the same filesystem for the rename to
//! be atomic, which holds because the temp file is a sibling of the target.

use crate::error::{ForgeError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ForgeError::Storage(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;
    replace(&temp_path, path)
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ForgeError::Storage(format!("invalid file path '{}'", target.display()))
        })?;

    // Per-process name so concurrent writers never share a temp file.
    Ok(parent.join(format!(".{}.{}.tmp", filename, std::process::id())))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        ForgeError::Storage(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let written = file.write_all(content).and_then(|_| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(ForgeError::Storage(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

fn replace(source: &Path, target: &Path) -> Result<()> {
    // rename() replaces an existing target on POSIX; Windows needs it gone first.
    #[cfg(not(unix))]
    if target.exists() {
        let _ = fs::remove_file(target);
    }

    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        ForgeError::Storage(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })
}
