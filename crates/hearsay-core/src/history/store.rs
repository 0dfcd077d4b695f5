//! The conversation history store.
//!
//! An in-memory map from [`ChatKey`] to an ordered, append-biased log of
//! messages, mirrored to durable storage through a [`SnapshotStore`] on
//! every mutation (write-through, no buffering). Read paths never touch
//! disk.
//!
//! All mutation goes through this type so that persistence is never
//! skipped; no other component holds a reference into a log.

use hearsay_types::chat::ChatKey;
use hearsay_types::error::HistoryError;
use hearsay_types::message::StoredMessage;
use tokio::sync::RwLock;
use tracing::debug;

use super::snapshot::{ChatLogs, SnapshotStore};

/// Durable per-chat conversation history.
///
/// Generic over its [`SnapshotStore`] so tests can run against an
/// in-memory snapshot and production against the JSON file codec.
///
/// Mutating operations hold the write lock across the persist await:
/// writers are fully serialized, readers run concurrently and never
/// observe a torn write. If a persist fails the in-memory mutation is
/// retained and the error surfaces to the caller; the store may then
/// diverge from disk until the next successful persist.
pub struct HistoryStore<S> {
    snapshots: S,
    logs: RwLock<ChatLogs>,
}

impl<S: SnapshotStore> HistoryStore<S> {
    /// Open the store, loading any persisted snapshot.
    ///
    /// A missing artifact starts the store empty; a corrupt one fails
    /// fast.
    pub async fn open(snapshots: S) -> Result<Self, HistoryError> {
        let logs = snapshots.load().await?;
        debug!(chats = logs.len(), "history store opened");
        Ok(Self {
            snapshots,
            logs: RwLock::new(logs),
        })
    }

    /// Append a message to the log for `key`, creating the log if absent.
    ///
    /// Returns the key back so callers that resolve it as part of the
    /// call can keep it without re-resolving. Appending the same message
    /// twice stores it twice -- de-duplication belongs upstream.
    pub async fn append(
        &self,
        key: ChatKey,
        message: StoredMessage,
    ) -> Result<ChatKey, HistoryError> {
        let mut logs = self.logs.write().await;
        logs.entry(key.clone()).or_default().push(message);
        self.snapshots.save(&logs).await?;
        Ok(key)
    }

    /// Replace the stored message whose id matches `message`, in place.
    ///
    /// Best effort: an unknown key or an unmatched message id is a
    /// silent no-op and does not rewrite the snapshot. Position in the
    /// log is preserved on replacement.
    pub async fn update(
        &self,
        key: &ChatKey,
        message: StoredMessage,
    ) -> Result<(), HistoryError> {
        let mut logs = self.logs.write().await;
        let Some(log) = logs.get_mut(key) else {
            return Ok(());
        };
        let Some(slot) = log.iter_mut().find(|m| m.message_id == message.message_id) else {
            return Ok(());
        };
        *slot = message;
        self.snapshots.save(&logs).await
    }

    /// The most recently appended message for `key`, if any.
    pub async fn last_message(&self, key: &ChatKey) -> Option<StoredMessage> {
        self.logs
            .read()
            .await
            .get(key)
            .and_then(|log| log.last().cloned())
    }

    /// The message `n` positions back from the most recent (`n = 1` is
    /// the most recent).
    ///
    /// Unknown keys and out-of-range depths come back as `Ok(None)` --
    /// absence is data, not an error. `n == 0` is a caller bug and fails
    /// with [`HistoryError::InvalidDepth`].
    pub async fn nth_last_message(
        &self,
        key: &ChatKey,
        n: usize,
    ) -> Result<Option<StoredMessage>, HistoryError> {
        if n == 0 {
            return Err(HistoryError::InvalidDepth);
        }
        let logs = self.logs.read().await;
        let Some(log) = logs.get(key) else {
            return Ok(None);
        };
        if n > log.len() {
            return Ok(None);
        }
        Ok(Some(log[log.len() - n].clone()))
    }

    /// Reset the log for `key` to empty, keeping the key known.
    ///
    /// Idempotent; a key that was never seen is a no-op. The snapshot is
    /// rewritten either way, matching the write-through contract.
    pub async fn clear(&self, key: &ChatKey) -> Result<(), HistoryError> {
        let mut logs = self.logs.write().await;
        if let Some(log) = logs.get_mut(key) {
            log.clear();
        }
        self.snapshots.save(&logs).await
    }

    /// Number of messages currently stored for `key` (0 when unknown).
    pub async fn message_count(&self, key: &ChatKey) -> usize {
        self.logs.read().await.get(key).map_or(0, Vec::len)
    }
}
