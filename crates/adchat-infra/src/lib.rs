//! Infrastructure layer for adchat.
//!
//! Contains the implementation of the `AssistantBackend` port defined in
//! `adchat-core` (a reqwest client against the assistant REST API) and
//! loading of `config.toml` from the data directory.

pub mod config;
pub mod http;
