//! File-backed score store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use scoreboard_core::ScoreRecord;
use tracing::{debug, instrument};

use crate::error::{Result, StoreError};

/// Reads and writes the score record at a fixed path.
///
/// Saves are serialized by an internal lock and land atomically: the record
/// is written to a sibling `.tmp` file which is then renamed over the target.
pub struct ScoreStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ScoreStore {
    /// Create a store for the given score file. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the score file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the score file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<ScoreRecord> {
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let record: ScoreRecord =
            serde_json::from_str(&content).map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })?;
        debug!(team_a = %record.team_a, team_b = %record.team_b, "score file loaded");
        Ok(record)
    }

    /// Encode and write the record, replacing the previous file contents.
    pub fn save(&self, record: &ScoreRecord) -> Result<()> {
        let bytes = encode(record)?;
        let tmp = self.tmp_path();

        let _guard = self.write_lock.lock();
        fs::write(&tmp, &bytes)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|source| {
                let _ = fs::remove_file(&tmp);
                StoreError::Io {
                    path: self.path.clone(),
                    source,
                }
            })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "score file saved");
        Ok(())
    }

    /// [`save`](Self::save) on the blocking thread pool.
    pub async fn save_async(self: Arc<Self>, record: ScoreRecord) -> Result<()> {
        tokio::task::spawn_blocking(move || self.save(&record))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Pretty-print with two-space indentation and no trailing newline.
pub fn encode(record: &ScoreRecord) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(record)?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
