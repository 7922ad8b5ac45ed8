//! Durable storage for progress snapshots.
//!
//! One JSON blob at a fixed path, wrapped in a versioned envelope. The
//! load path never fails outward: a missing file means a fresh start, and
//! a corrupt or incompatibly-versioned blob is discarded with a diagnostic
//! log line. Worst case the user's progress resets to defaults, which is
//! the accepted degraded mode.

use crate::progress::ProgressSnapshot;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::warn;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Current save format version.
const SAVE_VERSION: u32 = 1;

/// File name used under the store's directory.
const PROGRESS_FILE: &str = "chronicle_progress.json";

/// Versioned envelope around the persisted snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct SavedProgress {
    version: u32,
    progress: ProgressSnapshot,
}

/// Reads and writes the single progress blob.
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store using the standard file name under a directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(PROGRESS_FILE),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored snapshot, or `None` when there is nothing usable.
    ///
    /// Missing fields in an older blob are filled with their empty
    /// defaults by the snapshot's serde attributes, so callers can assume
    /// total fields. Corruption and version mismatches are recovered here
    /// and never propagate.
    pub async fn load(&self) -> Option<ProgressSnapshot> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read progress file, starting fresh");
                return None;
            }
        };

        match serde_json::from_str::<SavedProgress>(&content) {
            Ok(saved) if saved.version == SAVE_VERSION => Some(saved.progress),
            Ok(saved) => {
                warn!(
                    found = saved.version,
                    expected = SAVE_VERSION,
                    "unsupported progress version, starting fresh"
                );
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt progress file, starting fresh");
                None
            }
        }
    }

    /// Overwrite the stored blob with the given snapshot.
    pub async fn save(&self, progress: &ProgressSnapshot) -> Result<(), StoreError> {
        let saved = SavedProgress {
            version: SAVE_VERSION,
            progress: progress.clone(),
        };
        let content = serde_json::to_string_pretty(&saved)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Remove the stored blob. Removing a blob that does not exist is not
    /// an error.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
