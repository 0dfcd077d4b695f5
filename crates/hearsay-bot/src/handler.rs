//! Inbound event handling.
//!
//! One event at a time: resolve the chat key, mutate the history store,
//! mirror the message into the audit trail, answer control commands.
//! Reply generation for ordinary messages belongs to the agent layer
//! and is not wired here.
//!
//! A malformed event is logged and dropped; the loop keeps running. A
//! failed history persist stops the bot.

use hearsay_core::audit::MessageAudit;
use hearsay_core::history::key::resolve_chat_key;
use hearsay_core::history::snapshot::SnapshotStore;
use hearsay_core::history::store::HistoryStore;
use hearsay_core::tool::ToolRegistry;
use hearsay_types::chat::{ChatKey, ChatRef};
use hearsay_types::error::HistoryError;
use hearsay_types::message::{AuditRecord, StoredMessage};
use tracing::{debug, warn};

use std::sync::Arc;

use crate::transport::{ChatEvent, ChatTransport, InboundMessage};

/// Control commands understood by the bot itself.
enum Command {
    /// `/clear` -- wipe this chat's history.
    Clear,
    /// `/last [n]` -- show the nth most recent stored message.
    Last(usize),
    /// `/tools` -- list the tool functions the agent may call.
    Tools,
    /// Anything else starting with `/`.
    Unknown,
    /// A recognized command with unusable arguments.
    Malformed(&'static str),
}

/// Parse a control command out of a message text, if it is one.
fn parse_command(text: &str) -> Option<Command> {
    if !text.starts_with('/') {
        return None;
    }
    let mut parts = text.split_whitespace();
    let command = match parts.next() {
        Some("/clear") => Command::Clear,
        Some("/tools") => Command::Tools,
        Some("/last") => match parts.next() {
            None => Command::Last(1),
            Some(arg) => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Last(n),
                _ => Command::Malformed("usage: /last [n], n >= 1"),
            },
        },
        _ => Command::Unknown,
    };
    Some(command)
}

/// Drives the transport event loop against the history store and the
/// audit trail.
pub struct EventHandler<T, S, A> {
    transport: T,
    history: Arc<HistoryStore<S>>,
    audit: Arc<A>,
    tools: Arc<ToolRegistry>,
}

impl<T: ChatTransport, S: SnapshotStore, A: MessageAudit> EventHandler<T, S, A> {
    /// Wire a handler over its collaborators.
    pub fn new(
        transport: T,
        history: Arc<HistoryStore<S>>,
        audit: Arc<A>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            transport,
            history,
            audit,
            tools,
        }
    }

    /// Consume transport events until the stream closes.
    ///
    /// # Errors
    ///
    /// Propagates [`HistoryError::Persist`] from the store and stops.
    pub async fn run(mut self) -> Result<(), HistoryError> {
        while let Some(event) = self.transport.next_event().await {
            self.handle(event).await?;
        }
        debug!("transport closed, handler stopping");
        Ok(())
    }

    async fn handle(&mut self, event: ChatEvent) -> Result<(), HistoryError> {
        match event {
            ChatEvent::Message(inbound) => {
                let Some(key) = self.resolve_or_drop(&inbound) else {
                    return Ok(());
                };
                match parse_command(&inbound.message.text) {
                    Some(command) => self.run_command(&key, &inbound.chat, command).await,
                    None => self.store_message(key, inbound).await,
                }
            }
            ChatEvent::Edited(inbound) => {
                let Some(key) = self.resolve_or_drop(&inbound) else {
                    return Ok(());
                };
                self.history.update(&key, inbound.message.clone()).await?;
                self.record_audit(key, &inbound.message).await;
                Ok(())
            }
        }
    }

    /// Resolve the chat key, or log and drop the event.
    fn resolve_or_drop(&self, inbound: &InboundMessage) -> Option<ChatKey> {
        match resolve_chat_key(&inbound.chat) {
            Ok(key) => Some(key),
            Err(err) => {
                warn!(message_id = inbound.message.message_id, %err, "dropping unresolvable event");
                None
            }
        }
    }

    async fn store_message(
        &self,
        key: ChatKey,
        inbound: InboundMessage,
    ) -> Result<(), HistoryError> {
        let key = self.history.append(key, inbound.message.clone()).await?;
        debug!(chat = %key, message_id = inbound.message.message_id, "message stored");
        self.record_audit(key, &inbound.message).await;
        Ok(())
    }

    /// Mirror a message into the audit trail.
    ///
    /// Audit failures are logged, not propagated; the history append
    /// already happened.
    async fn record_audit(&self, key: ChatKey, message: &StoredMessage) {
        let record = AuditRecord::for_message(key, message);
        if let Err(err) = self.audit.record(&record).await {
            warn!(chat = %record.chat_key, message_id = record.message_id, %err, "audit record failed");
        }
    }

    async fn run_command(
        &self,
        key: &ChatKey,
        chat: &ChatRef,
        command: Command,
    ) -> Result<(), HistoryError> {
        let reply = match command {
            Command::Clear => {
                self.history.clear(key).await?;
                "History cleared.".to_string()
            }
            Command::Last(n) => match self.history.nth_last_message(key, n).await? {
                Some(message) => format!("[{}] {}", message.sender, message.text),
                None => "No stored message that far back.".to_string(),
            },
            Command::Tools => {
                if self.tools.is_empty() {
                    "No tools enabled.".to_string()
                } else {
                    format!("Available tools: {}", self.tools.names().join(", "))
                }
            }
            Command::Unknown => "Unknown command.".to_string(),
            Command::Malformed(usage) => usage.to_string(),
        };

        if let Err(err) = self.transport.send_text(chat, &reply).await {
            warn!(chat = %key, %err, "failed to send reply");
        }
        Ok(())
    }
}
