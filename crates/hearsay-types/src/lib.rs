//! Shared domain types for Hearsay.
//!
//! This crate contains the core domain types used across the Hearsay
//! chat-bot backend: chat keys, stored messages, audit records,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono,
//! thiserror, and secrecy.

pub mod chat;
pub mod config;
pub mod error;
pub mod message;
