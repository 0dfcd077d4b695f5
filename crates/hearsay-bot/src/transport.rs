//! Chat transport boundary.
//!
//! The platform-specific delivery mechanism lives behind this trait;
//! the core only ever sees raw chat references and stored messages.
//! `ConsoleTransport` is the built-in implementation for talking to the
//! bot from a local terminal.

use hearsay_types::chat::ChatRef;
use hearsay_types::error::TransportError;
use hearsay_types::message::StoredMessage;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// One inbound message event: the raw chat it arrived in plus the
/// message itself.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat: ChatRef,
    pub message: StoredMessage,
}

/// Events a transport can deliver.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// A new message arrived.
    Message(InboundMessage),
    /// A previously delivered message was edited on the platform.
    Edited(InboundMessage),
}

/// The transport boundary: event intake and reply delivery.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait ChatTransport: Send {
    /// Next inbound event; `None` means the stream closed.
    fn next_event(&mut self) -> impl std::future::Future<Output = Option<ChatEvent>> + Send;

    /// Deliver a text reply into the given chat.
    fn send_text(
        &self,
        chat: &ChatRef,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}

/// Terminal transport for local development.
///
/// Every stdin line becomes a message from user `local` in chat 0;
/// replies go to stdout. Message ids count up from 1.
pub struct ConsoleTransport {
    lines: Lines<BufReader<Stdin>>,
    next_message_id: i64,
}

impl ConsoleTransport {
    /// Create a transport reading from this process's stdin.
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            next_message_id: 1,
        }
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTransport for ConsoleTransport {
    async fn next_event(&mut self) -> Option<ChatEvent> {
        loop {
            let line = self.lines.next_line().await.ok()??;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            let message_id = self.next_message_id;
            self.next_message_id += 1;

            return Some(ChatEvent::Message(InboundMessage {
                chat: ChatRef::direct(0),
                message: StoredMessage {
                    message_id,
                    sender: "local".to_string(),
                    text: text.to_string(),
                    reply_to: None,
                    sent_at: chrono::Utc::now(),
                },
            }));
        }
    }

    async fn send_text(&self, _chat: &ChatRef, text: &str) -> Result<(), TransportError> {
        println!("{text}");
        Ok(())
    }
}
