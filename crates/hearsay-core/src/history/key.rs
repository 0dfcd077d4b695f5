//! Chat-key resolution.
//!
//! Derives the canonical [`ChatKey`] for a conversation from raw chat
//! metadata. Some platforms subdivide a group chat into named topics
//! without giving those topics globally unique ids, so topic messages
//! get a compound `{chat}_{thread}` key to keep their histories apart.

use hearsay_types::chat::{ChatKey, ChatRef};
use hearsay_types::error::HistoryError;

/// Resolve the canonical chat key for a raw chat reference.
///
/// Identical `(chat, thread)` pairs always resolve to the same key, and
/// distinct sub-threads of one parent chat never collide.
///
/// # Errors
///
/// - [`HistoryError::MissingChatId`] when the reference has no chat id.
/// - [`HistoryError::MissingThreadId`] when the sub-thread flag is set
///   but no thread id was delivered.
pub fn resolve_chat_key(chat: &ChatRef) -> Result<ChatKey, HistoryError> {
    let chat_id = chat.chat_id.ok_or(HistoryError::MissingChatId)?;

    if !chat.is_thread {
        // Incidental thread ids on ordinary replies are ignored; only
        // the explicit sub-thread flag makes a topic.
        return Ok(ChatKey::direct(chat_id));
    }

    let thread_id = chat.thread_id.ok_or(HistoryError::MissingThreadId)?;
    Ok(ChatKey::threaded(chat_id, thread_id))
}
