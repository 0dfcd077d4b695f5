//! Message types: the stored history record and the audit-trail row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::ChatKey;

/// One chat message as kept in a history log.
///
/// `message_id` is assigned by the chat platform and is unique within
/// one chat key only, never globally. Every field round-trips through
/// serde so the history snapshot can reconstruct the message losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Platform-assigned message id, unique per chat key.
    pub message_id: i64,
    /// Who sent the message.
    pub sender: String,
    /// The message text itself.
    pub text: String,
    /// If the message is a reply, who it is replying to.
    pub reply_to: Option<String>,
    pub sent_at: DateTime<Utc>,
}

/// One row of the relational message audit trail.
///
/// `recorded_at` is set when the row is stored, not when the message was
/// sent; the two can differ when events arrive late.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub chat_key: ChatKey,
    pub message_id: i64,
    pub sender: String,
    pub reply_to: Option<String>,
    pub text: String,
    pub recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Build an audit row for a message, stamped with the current time.
    pub fn for_message(chat_key: ChatKey, message: &StoredMessage) -> Self {
        Self {
            id: Uuid::now_v7(),
            chat_key,
            message_id: message.message_id,
            sender: message.sender.clone(),
            reply_to: message.reply_to.clone(),
            text: message.text.clone(),
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_record_copies_message_fields() {
        let msg = StoredMessage {
            message_id: 7,
            sender: "ada".to_string(),
            text: "hello".to_string(),
            reply_to: Some("bob".to_string()),
            sent_at: Utc::now(),
        };

        let record = AuditRecord::for_message(ChatKey::direct(100), &msg);
        assert_eq!(record.chat_key.as_str(), "100");
        assert_eq!(record.message_id, 7);
        assert_eq!(record.sender, "ada");
        assert_eq!(record.reply_to.as_deref(), Some("bob"));
        assert_eq!(record.text, "hello");
    }

    #[test]
    fn test_stored_message_survives_serde() {
        let msg = StoredMessage {
            message_id: 42,
            sender: "ada".to_string(),
            text: "what's the BTC price?".to_string(),
            reply_to: None,
            sent_at: Utc::now(),
        };

        let json = serde_json::to_string(&msg).unwrap();
        let back: StoredMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
