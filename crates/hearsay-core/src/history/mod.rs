//! Conversation history: key resolution, the store, and its snapshot port.

pub mod context;
pub mod key;
pub mod snapshot;
pub mod store;

pub use key::resolve_chat_key;
pub use snapshot::{ChatLogs, SnapshotStore};
pub use store::HistoryStore;
