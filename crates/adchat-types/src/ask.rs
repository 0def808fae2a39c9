//! Normalized reply from the ask endpoint.
//!
//! Wire formats with duplicate field spellings are collapsed into this one
//! shape at the network boundary; the session core only ever sees `AskReply`.

use serde::{Deserialize, Serialize};

/// Result of one ask call that reached the backend.
///
/// `error` being set means a domain-level failure (for example the
/// question quota was hit); the other fields may still be populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskReply {
    pub answer: Option<String>,
    pub suggestions: Option<Vec<String>>,
    pub ask_count: Option<u32>,
    pub ask_limit: Option<u32>,
    pub limit_reached: Option<bool>,
    pub error: Option<String>,
}

impl AskReply {
    /// A successful answer with no extra metadata.
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            answer: Some(text.into()),
            ..Default::default()
        }
    }

    /// A domain error reply.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            error: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = Some(suggestions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_counts(mut self, ask_count: u32, ask_limit: u32) -> Self {
        self.ask_count = Some(ask_count);
        self.ask_limit = Some(ask_limit);
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
