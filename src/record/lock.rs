//! Record directory lock
//!
//! An exclusive OS-level lock on `<ccd_dir>/.lock`, held for the scan and
//! write of a mutation. Every handle and every process opens the lock file
//! itself, so the lock covers the directory rather than one in-memory value.
//!
//! The lock file is never removed. Hidden entries are not records, so the
//! directory scan never sees it.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{CcdError, Result};

/// Name of the lock file inside the CCD directory
pub const LOCK_FILENAME: &str = ".lock";

/// Held exclusive lock on a CCD directory, released on drop
#[derive(Debug)]
pub struct DirLock {
    file: File,
    path: PathBuf,
}

impl DirLock {
    /// Block until the exclusive lock on `dir` is held
    ///
    /// `dir` must already exist.
    pub fn acquire(dir: &Path) -> Result<Self> {
        let path = dir.join(LOCK_FILENAME);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| CcdError::io(&path, e))?;

        FileExt::lock_exclusive(&file).map_err(|e| CcdError::io(&path, e))?;
        tracing::trace!("Acquired {}", path.display());

        Ok(Self { file, path })
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        // Closing the file releases the lock anyway
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}
