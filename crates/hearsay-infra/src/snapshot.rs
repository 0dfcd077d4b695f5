//! JSON file implementation of the snapshot persistence port.
//!
//! The entire history store is one JSON object mapping chat-key strings
//! to arrays of message records. Saves go through a sibling temp file
//! and a rename; neither a reader nor a crash mid-write can observe a
//! partially written snapshot.

use hearsay_core::history::snapshot::{ChatLogs, SnapshotStore};
use hearsay_types::error::HistoryError;
use tracing::debug;

use std::path::{Path, PathBuf};

/// JSON-file-backed [`SnapshotStore`].
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a store writing to `path`.
    ///
    /// The file itself need not exist yet; the parent directory must.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the snapshot lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp path the snapshot is staged at before the rename.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonSnapshotStore {
    async fn load(&self) -> Result<ChatLogs, HistoryError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history snapshot, starting empty");
                return Ok(ChatLogs::new());
            }
            Err(err) => {
                return Err(HistoryError::CorruptSnapshot {
                    path: self.path.display().to_string(),
                    reason: err.to_string(),
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|err| HistoryError::CorruptSnapshot {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        })
    }

    async fn save(&self, logs: &ChatLogs) -> Result<(), HistoryError> {
        let json = serde_json::to_vec_pretty(logs)
            .map_err(|err| HistoryError::Persist(err.to_string()))?;

        let staging = self.staging_path();
        tokio::fs::write(&staging, &json)
            .await
            .map_err(|err| HistoryError::Persist(err.to_string()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|err| HistoryError::Persist(err.to_string()))?;

        Ok(())
    }
}
