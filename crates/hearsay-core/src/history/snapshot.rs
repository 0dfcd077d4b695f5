//! Snapshot persistence port.
//!
//! Defines the interface the history store uses to mirror its in-memory
//! state to durable storage. Implementations live in hearsay-infra.

use hearsay_types::chat::ChatKey;
use hearsay_types::error::HistoryError;
use hearsay_types::message::StoredMessage;

use std::collections::HashMap;

/// The full persisted state: every chat key and its ordered message log.
pub type ChatLogs = HashMap<ChatKey, Vec<StoredMessage>>;

/// Trait for persisting the entire history store as one artifact.
///
/// `save` is invoked synchronously after every mutation (write-through,
/// no batching); `load` once at startup. Uses RPITIT (native async fn in
/// traits, Rust 2024 edition). Implementations live in hearsay-infra.
pub trait SnapshotStore: Send + Sync {
    /// Read the persisted snapshot.
    ///
    /// A missing artifact yields an empty map; an unreadable or
    /// unparseable one is a [`HistoryError::CorruptSnapshot`].
    fn load(&self) -> impl std::future::Future<Output = Result<ChatLogs, HistoryError>> + Send;

    /// Overwrite the persisted snapshot with the given state.
    ///
    /// Must be atomic from a reader's point of view: no partially
    /// written artifact may ever be observable.
    fn save(
        &self,
        logs: &ChatLogs,
    ) -> impl std::future::Future<Output = Result<(), HistoryError>> + Send;
}
