//! Conversation-session core for adchat.
//!
//! This crate defines the `AssistantBackend` port that the infrastructure
//! layer implements, and the session components that drive it. It depends
//! only on `adchat-types` -- never on `adchat-infra` or any HTTP crate.

pub mod backend;
pub mod chat;
