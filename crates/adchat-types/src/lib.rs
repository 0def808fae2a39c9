//! Shared domain types for adchat.
//!
//! This crate contains the types every other crate speaks: the subject a
//! conversation is scoped to, display messages, persisted log entries,
//! normalized ask replies, session state, configuration and error enums.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod ask;
pub mod chat;
pub mod config;
pub mod error;
pub mod log;
pub mod subject;
