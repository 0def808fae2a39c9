//! Assistant configuration.
//!
//! `AssistantConfig` is the `config.toml` that points the session at a
//! backend and supplies the fixed texts shown for placeholders and failures.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the assistant session.
///
/// Loaded from `~/.adchat/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Backend origin, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// History is read from `GET {base_url}{history_path}/{subject}`.
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Questions are posted to `POST {base_url}{ask_path}`.
    #[serde(default = "default_ask_path")]
    pub ask_path: String,

    /// Bound on every backend request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Question quota assumed when the backend does not report one.
    #[serde(default = "default_ask_limit")]
    pub default_ask_limit: u32,

    #[serde(default = "default_thinking_text")]
    pub thinking_text: String,

    /// Shown when the opening greeting could not be fetched.
    #[serde(default = "default_connect_failure_text")]
    pub connect_failure_text: String,

    /// Shown when a question could not be sent or answered.
    #[serde(default = "default_transport_failure_text")]
    pub transport_failure_text: String,

    /// Shown when the backend answered without any text.
    #[serde(default = "default_empty_answer_text")]
    pub empty_answer_text: String,

    /// Case-insensitive words that mark a domain error as a quota error.
    #[serde(default = "default_limit_keywords")]
    pub limit_keywords: Vec<String>,

    /// Confirmation appended once an expert hand-off request was submitted.
    #[serde(default = "default_handoff_text")]
    pub handoff_text: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_history_path() -> String {
    "/api/assistant/history".to_string()
}

fn default_ask_path() -> String {
    "/api/assistant/ask".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_ask_limit() -> u32 {
    10
}

fn default_thinking_text() -> String {
    "Thinking...".to_string()
}

fn default_connect_failure_text() -> String {
    "Sorry, I could not connect to the assistant right now. Please try again later.".to_string()
}

fn default_transport_failure_text() -> String {
    "Sorry, something went wrong while getting an answer. Please try again.".to_string()
}

fn default_empty_answer_text() -> String {
    "Sorry, I don't have an answer for that yet.".to_string()
}

fn default_limit_keywords() -> Vec<String> {
    vec!["limit".to_string(), "quota".to_string()]
}

fn default_handoff_text() -> String {
    "Thanks! An expert will review your ad and get back to you soon.".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            history_path: default_history_path(),
            ask_path: default_ask_path(),
            request_timeout_secs: default_request_timeout_secs(),
            default_ask_limit: default_ask_limit(),
            thinking_text: default_thinking_text(),
            connect_failure_text: default_connect_failure_text(),
            transport_failure_text: default_transport_failure_text(),
            empty_answer_text: default_empty_answer_text(),
            limit_keywords: default_limit_keywords(),
            handoff_text: default_handoff_text(),
        }
    }
}
