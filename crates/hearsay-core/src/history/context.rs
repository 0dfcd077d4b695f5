//! Conversational context assembly for the agent layer.

use hearsay_types::chat::ChatKey;
use hearsay_types::error::HistoryError;
use hearsay_types::message::StoredMessage;

use super::snapshot::SnapshotStore;
use super::store::HistoryStore;

/// Collect up to `depth` of the most recent messages for `key`,
/// oldest first, ready to be laid into an LLM prompt.
///
/// Asking for more context than the log holds is not an error; you just
/// get the whole log.
pub async fn recent_context<S: SnapshotStore>(
    store: &HistoryStore<S>,
    key: &ChatKey,
    depth: usize,
) -> Result<Vec<StoredMessage>, HistoryError> {
    let available = store.message_count(key).await.min(depth);
    let mut context = Vec::with_capacity(available);
    for n in (1..=available).rev() {
        if let Some(message) = store.nth_last_message(key, n).await? {
            context.push(message);
        }
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::snapshot::ChatLogs;
    use chrono::Utc;

    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySnapshots(Mutex<ChatLogs>);

    impl SnapshotStore for MemorySnapshots {
        async fn load(&self) -> Result<ChatLogs, HistoryError> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn save(&self, logs: &ChatLogs) -> Result<(), HistoryError> {
            *self.0.lock().unwrap() = logs.clone();
            Ok(())
        }
    }

    fn msg(id: i64, text: &str) -> StoredMessage {
        StoredMessage {
            message_id: id,
            sender: "ada".to_string(),
            text: text.to_string(),
            reply_to: None,
            sent_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_context_is_oldest_first_and_capped() {
        let store = HistoryStore::open(MemorySnapshots::default()).await.unwrap();
        let key = ChatKey::direct(100);
        for i in 1..=5 {
            store.append(key.clone(), msg(i, &format!("m{i}"))).await.unwrap();
        }

        let context = recent_context(&store, &key, 3).await.unwrap();
        let texts: Vec<_> = context.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["m3", "m4", "m5"]);
    }

    #[tokio::test]
    async fn test_context_larger_than_log_returns_whole_log() {
        let store = HistoryStore::open(MemorySnapshots::default()).await.unwrap();
        let key = ChatKey::direct(100);
        store.append(key.clone(), msg(1, "only")).await.unwrap();

        let context = recent_context(&store, &key, 10).await.unwrap();
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].text, "only");
    }

    #[tokio::test]
    async fn test_context_for_unknown_chat_is_empty() {
        let store = HistoryStore::open(MemorySnapshots::default()).await.unwrap();
        let context = recent_context(&store, &ChatKey::direct(404), 10)
            .await
            .unwrap();
        assert!(context.is_empty());
    }
}
