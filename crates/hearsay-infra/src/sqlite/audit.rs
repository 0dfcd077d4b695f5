//! SQLite message audit implementation.
//!
//! Implements `MessageAudit` from `hearsay-core` using sqlx with split
//! read/write pools. One row per (chat, message); re-recording the same
//! pair overwrites the row, which is how edited messages keep a single
//! audit entry.

use chrono::{DateTime, Utc};
use hearsay_core::audit::MessageAudit;
use hearsay_types::chat::ChatKey;
use hearsay_types::error::RepositoryError;
use hearsay_types::message::AuditRecord;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageAudit`.
pub struct SqliteMessageAudit {
    pool: DatabasePool,
}

impl SqliteMessageAudit {
    /// Create a new audit repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row type
// ---------------------------------------------------------------------------

struct AuditRow {
    id: String,
    chat_key: String,
    message_id: i64,
    sender: String,
    reply_to: Option<String>,
    text: String,
    recorded_at: String,
}

impl AuditRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_key: row.try_get("chat_key")?,
            message_id: row.try_get("message_id")?,
            sender: row.try_get("sender")?,
            reply_to: row.try_get("reply_to")?,
            text: row.try_get("text")?,
            recorded_at: row.try_get("recorded_at")?,
        })
    }

    fn into_record(self) -> Result<AuditRecord, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid UUID: {e}")))?;
        let recorded_at = parse_datetime(&self.recorded_at)?;

        Ok(AuditRecord {
            id,
            chat_key: ChatKey::from(self.chat_key),
            message_id: self.message_id,
            sender: self.sender,
            reply_to: self.reply_to,
            text: self.text,
            recorded_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// MessageAudit impl
// ---------------------------------------------------------------------------

impl MessageAudit for SqliteMessageAudit {
    async fn record(&self, record: &AuditRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO messages
               (id, chat_key, message_id, sender, reply_to, text, recorded_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT (chat_key, message_id) DO UPDATE SET
                   sender = excluded.sender,
                   reply_to = excluded.reply_to,
                   text = excluded.text,
                   recorded_at = excluded.recorded_at"#,
        )
        .bind(record.id.to_string())
        .bind(record.chat_key.as_str())
        .bind(record.message_id)
        .bind(&record.sender)
        .bind(&record.reply_to)
        .bind(&record.text)
        .bind(format_datetime(&record.recorded_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn messages_for_chat(
        &self,
        chat_key: &ChatKey,
    ) -> Result<Vec<AuditRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE chat_key = ? ORDER BY recorded_at ASC",
        )
        .bind(chat_key.as_str())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let r = AuditRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            records.push(r.into_record()?);
        }
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use hearsay_types::message::StoredMessage;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn stored(id: i64, text: &str) -> StoredMessage {
        StoredMessage {
            message_id: id,
            sender: "ada".to_string(),
            text: text.to_string(),
            reply_to: None,
            sent_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_record_and_fetch() {
        let audit = SqliteMessageAudit::new(test_pool().await);
        let key = ChatKey::threaded(100, 5);

        audit
            .record(&AuditRecord::for_message(key.clone(), &stored(1, "hello")))
            .await
            .unwrap();

        let records = audit.messages_for_chat(&key).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "hello");
        assert_eq!(records[0].message_id, 1);
        assert_eq!(records[0].chat_key, key);
    }

    #[tokio::test]
    async fn test_re_recording_overwrites_the_row() {
        let audit = SqliteMessageAudit::new(test_pool().await);
        let key = ChatKey::direct(100);

        audit
            .record(&AuditRecord::for_message(key.clone(), &stored(1, "original")))
            .await
            .unwrap();
        audit
            .record(&AuditRecord::for_message(key.clone(), &stored(1, "edited")))
            .await
            .unwrap();

        let records = audit.messages_for_chat(&key).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "edited");
    }

    #[tokio::test]
    async fn test_same_message_id_in_different_chats() {
        let audit = SqliteMessageAudit::new(test_pool().await);
        let a = ChatKey::direct(100);
        let b = ChatKey::threaded(100, 5);

        audit
            .record(&AuditRecord::for_message(a.clone(), &stored(1, "in chat")))
            .await
            .unwrap();
        audit
            .record(&AuditRecord::for_message(b.clone(), &stored(1, "in thread")))
            .await
            .unwrap();

        assert_eq!(audit.messages_for_chat(&a).await.unwrap().len(), 1);
        assert_eq!(audit.messages_for_chat(&b).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_chat_is_empty() {
        let audit = SqliteMessageAudit::new(test_pool().await);
        let records = audit.messages_for_chat(&ChatKey::direct(404)).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_reply_target_roundtrips() {
        let audit = SqliteMessageAudit::new(test_pool().await);
        let key = ChatKey::direct(100);

        let mut msg = stored(1, "replying");
        msg.reply_to = Some("bob".to_string());
        audit
            .record(&AuditRecord::for_message(key.clone(), &msg))
            .await
            .unwrap();

        let records = audit.messages_for_chat(&key).await.unwrap();
        assert_eq!(records[0].reply_to.as_deref(), Some("bob"));
    }
}
