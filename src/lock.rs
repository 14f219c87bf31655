//! Recipe session locking
//!
//! Provides exclusive locking so two processes never write the same
//! configuration's requirements at once.

use crate::error::{RecipeError, Result};
use fs2::FileExt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// How old a lock file can be before it's considered stale (2 hours)
const STALE_LOCK_AGE_SECS: u64 = 7200;

/// Check if a lock file is stale (older than STALE_LOCK_AGE_SECS)
fn is_stale_lock(lock_path: &Path) -> bool {
    if let Ok(metadata) = std::fs::metadata(lock_path)
        && let Ok(modified) = metadata.modified()
        && let Ok(age) = std::time::SystemTime::now().duration_since(modified)
    {
        return age.as_secs() > STALE_LOCK_AGE_SECS;
    }
    false
}

/// Lock file path for `configuration` inside the requirements directory.
pub fn lock_path(dir: &Path, configuration: &str) -> PathBuf {
    dir.join(format!("{}.lock", configuration))
}

/// Take the exclusive lock for one configuration under `dir`.
/// Returns a guard that releases the lock when dropped.
pub fn acquire_root_lock(dir: &Path, configuration: &str) -> Result<RootLock> {
    let lock_path = lock_path(dir, configuration);

    if lock_path.exists() && is_stale_lock(&lock_path) {
        let _ = std::fs::remove_file(&lock_path);
    }

    let lock_file = File::create(&lock_path)?;

    if lock_file.try_lock_exclusive().is_err() {
        return Err(RecipeError::Locked {
            configuration: configuration.to_string(),
            lock: lock_path,
        });
    }

    Ok(RootLock {
        _file: lock_file,
        path: lock_path,
    })
}

/// RAII guard for a session lock - deletes the lock file when dropped
#[derive(Debug)]
pub struct RootLock {
    _file: File,
    path: PathBuf,
}

impl RootLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RootLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
