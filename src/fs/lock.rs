//! Exclusive lock files.
//!
//! A lock is a file created with `create_new`, so exactly one process can
//! hold it. The guard deletes the file when dropped. Locks only ever cover a
//! short read-modify-write of a state file, never a network call, so a
//! contended acquire waits briefly instead of failing right away. A lock file
//! older than [`STALE_AFTER`] is treated as left behind by a crashed process
//! and taken over.

use crate::error::{ForgeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Age after which a lock file is considered abandoned.
pub const STALE_AFTER: Duration = Duration::from_secs(30);

const RETRY_INTERVAL: Duration = Duration::from_millis(20);
const MAX_ATTEMPTS: u32 = 100;

/// Contents of a lock file, for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LockMetadata {
    action: String,
    pid: u32,
    created_at: DateTime<Utc>,
}

impl LockMetadata {
    fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
            pid: std::process::id(),
            created_at: Utc::now(),
        }
    }

    fn from_file(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn is_stale(&self) -> bool {
        let age = Utc::now().signed_duration_since(self.created_at);
        age.to_std().is_ok_and(|age| age > STALE_AFTER)
    }
}

/// RAII guard for a lock file.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to release lock");
        }
    }
}

/// Acquire the lock at `path`, waiting for a current holder to finish.
pub fn acquire_lock(path: &Path, action: &str) -> Result<LockGuard> {
    for _ in 0..MAX_ATTEMPTS {
        if let Some(guard) = try_acquire(path, action)? {
            return Ok(guard);
        }

        if is_stale(path) {
            warn!(path = %path.display(), "removing stale lock");
            let _ = fs::remove_file(path);
        } else {
            thread::sleep(RETRY_INTERVAL);
        }
    }

    let holder = LockMetadata::from_file(path)
        .map(|meta| format!(" (held by pid {} for '{}')", meta.pid, meta.action))
        .unwrap_or_default();
    Err(ForgeError::Storage(format!(
        "lock '{}' is held by another fruitforge process{}",
        path.display(),
        holder
    )))
}

/// Stale by its recorded creation time, or by mtime when the metadata is unreadable.
fn is_stale(path: &Path) -> bool {
    if let Some(meta) = LockMetadata::from_file(path) {
        return meta.is_stale();
    }
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|age| age > STALE_AFTER)
}

/// One `create_new` attempt. `Ok(None)` means the lock is currently held.
fn try_acquire(path: &Path, action: &str) -> Result<Option<LockGuard>> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(ForgeError::Storage(format!(
                "failed to acquire lock '{}': {}",
                path.display(),
                e
            )));
        }
    };

    // Metadata is diagnostic only.
    if let Ok(json) = serde_json::to_string(&LockMetadata::new(action))
        && let Err(e) = file.write_all(json.as_bytes())
    {
        debug!(path = %path.display(), error = %e, "could not write lock metadata");
    }

    Ok(Some(LockGuard {
        path: path.to_path_buf(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lock_file_exists_while_held() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.lock");

        let guard = acquire_lock(&path, "generate").unwrap();
        assert!(path.exists());
        let meta = LockMetadata::from_file(&path).unwrap();
        assert_eq!(meta.action, "generate");
        assert_eq!(meta.pid, std::process::id());

        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn test_held_lock_is_not_acquired_twice() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.lock");

        let _guard = acquire_lock(&path, "reroll").unwrap();
        assert!(try_acquire(&path, "undo").unwrap().is_none());
    }

    #[test]
    fn test_waiter_gets_lock_after_release() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.lock");
        let guard = acquire_lock(&path, "generate").unwrap();

        let waiter_path = path.clone();
        let waiter = thread::spawn(move || acquire_lock(&waiter_path, "reroll").map(|_| ()));
        thread::sleep(Duration::from_millis(60));
        drop(guard);

        waiter.join().unwrap().unwrap();
    }

    #[test]
    fn test_stale_lock_is_taken_over() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.lock");
        let abandoned = LockMetadata {
            action: "generate".to_string(),
            pid: 1,
            created_at: Utc::now() - chrono::Duration::minutes(5),
        };
        fs::write(&path, serde_json::to_string(&abandoned).unwrap()).unwrap();

        let _guard = acquire_lock(&path, "reroll").unwrap();
        assert_eq!(LockMetadata::from_file(&path).unwrap().action, "reroll");
    }
}
