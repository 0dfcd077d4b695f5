//! Message audit trail port.
//!
//! The relational side of message storage: one row per (chat, message),
//! kept alongside the JSON history snapshot for querying and restart
//! recovery. Implementations live in hearsay-infra.

use hearsay_types::chat::ChatKey;
use hearsay_types::error::RepositoryError;
use hearsay_types::message::AuditRecord;

/// Repository trait for the message audit trail.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in hearsay-infra (e.g. `SqliteMessageAudit`).
pub trait MessageAudit: Send + Sync {
    /// Store an audit row (upsert).
    ///
    /// The platform message id is unique per chat key, not globally;
    /// recording the same (chat, message) pair again overwrites the row,
    /// which is how edited messages keep a single audit entry.
    fn record(
        &self,
        record: &AuditRecord,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All audit rows for a chat, ordered by `recorded_at` ascending.
    fn messages_for_chat(
        &self,
        chat_key: &ChatKey,
    ) -> impl std::future::Future<Output = Result<Vec<AuditRecord>, RepositoryError>> + Send;
}
