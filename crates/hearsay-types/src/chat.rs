//! Chat identity types.
//!
//! A `ChatKey` is the canonical string identity of one conversation
//! thread. Plain chats use the raw chat id; messages inside a named
//! sub-thread (a "topic") get a compound `{chat}_{thread}` key so that
//! topics within the same parent chat never share a history log.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Canonical identity of one conversation thread.
///
/// Serializes transparently as its inner string, so it can key a JSON
/// object in the persisted history snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatKey(String);

impl ChatKey {
    /// Key for a plain chat with no sub-thread.
    pub fn direct(chat_id: i64) -> Self {
        Self(chat_id.to_string())
    }

    /// Key for a message inside a named sub-thread of a chat.
    ///
    /// Distinct thread ids under the same parent chat yield distinct keys.
    pub fn threaded(chat_id: i64, thread_id: i64) -> Self {
        Self(format!("{chat_id}_{thread_id}"))
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for ChatKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Raw chat metadata as delivered by a transport.
///
/// Fields are optional because wire payloads are: a malformed update may
/// omit any of them. Validation happens at resolution time, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRef {
    /// Numeric id of the parent chat.
    pub chat_id: Option<i64>,
    /// Whether the message belongs to a named sub-thread of the chat.
    pub is_thread: bool,
    /// Numeric id of the sub-thread, when `is_thread` is set.
    ///
    /// Platforms also attach incidental thread ids to ordinary replies;
    /// those are ignored unless `is_thread` is true.
    pub thread_id: Option<i64>,
}

impl ChatRef {
    /// A plain chat reference with no sub-thread.
    pub fn direct(chat_id: i64) -> Self {
        Self {
            chat_id: Some(chat_id),
            is_thread: false,
            thread_id: None,
        }
    }

    /// A reference to a named sub-thread of a chat.
    pub fn threaded(chat_id: i64, thread_id: i64) -> Self {
        Self {
            chat_id: Some(chat_id),
            is_thread: true,
            thread_id: Some(thread_id),
        }
    }
}
