use thiserror::Error;

/// Errors from the conversation history subsystem.
///
/// Read operations never produce errors for absence -- unknown keys and
/// out-of-range lookups come back as `None`. These variants cover
/// genuine precondition violations and persistence failures only.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("chat reference has no chat id")]
    MissingChatId,

    #[error("sub-thread message has no thread id")]
    MissingThreadId,

    #[error("history depth must be at least 1")]
    InvalidDepth,

    #[error("failed to persist history snapshot: {0}")]
    Persist(String),

    #[error("history snapshot at '{path}' is corrupt: {reason}")]
    CorruptSnapshot { path: String, reason: String },
}

/// Errors from repository operations (audit trail).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors raised while assembling startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read agent config at '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse agent config at '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("agent config enables unknown tool '{0}'")]
    UnknownTool(String),
}

/// Errors at the chat transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to send message: {0}")]
    Send(String),
}

/// Errors from tool-function invocations.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("no tool registered under '{0}'")]
    Unknown(String),

    #[error("bad tool arguments: {0}")]
    BadArgs(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}
