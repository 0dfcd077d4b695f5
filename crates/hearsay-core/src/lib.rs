//! Business logic and port trait definitions for Hearsay.
//!
//! This crate holds the conversation history store and the "ports" the
//! infrastructure layer implements: snapshot persistence, the message
//! audit trail, and tool functions. It depends only on `hearsay-types`
//! -- never on `hearsay-infra` or any database/IO crate.

pub mod audit;
pub mod history;
pub mod tool;
