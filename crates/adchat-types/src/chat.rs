//! Display messages and per-activation session state.
//!
//! A `ChatMessage` is what the widget renders. Assistant messages may be
//! created as pending placeholders ("thinking") and finalized in place once
//! the backend answers; their text is frozen after that.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Assistant,
    User,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Assistant => write!(f, "assistant"),
            Sender::User => write!(f, "user"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assistant" => Ok(Sender::Assistant),
            "user" => Ok(Sender::User),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single message in the conversation as displayed.
///
/// `id` is a UUID v7 and never changes. `text` can only be changed while
/// the message is pending, via [`ChatMessage::finalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: Uuid,
    sender: Sender,
    text: String,
    pending: bool,
}

impl ChatMessage {
    /// A finalized message authored by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::finalized(Sender::User, text)
    }

    /// A finalized assistant message (history replay, hand-off notices).
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::finalized(Sender::Assistant, text)
    }

    /// An assistant placeholder awaiting a response.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender: Sender::Assistant,
            text: text.into(),
            pending: true,
        }
    }

    fn finalized(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender,
            text: text.into(),
            pending: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Replace the placeholder text and clear the pending flag.
    ///
    /// Returns `false` (and changes nothing) if the message was already final.
    pub fn finalize(&mut self, text: impl Into<String>) -> bool {
        if !self.pending {
            return false;
        }
        self.text = text.into();
        self.pending = false;
        true
    }
}

/// Mutable state of one widget activation.
///
/// `messages` is append-only apart from in-place finalization of the single
/// pending placeholder. `ask_count`/`ask_limit` stay `None` until the backend
/// (or a replayed history) supplies them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub messages: Vec<ChatMessage>,
    pub ask_count: Option<u32>,
    pub ask_limit: Option<u32>,
    /// Sticky override: once the backend signals the limit it stays reached.
    pub limit_reached: bool,
    pub suggestions: Vec<String>,
    /// True while a network call owned by this session is outstanding.
    pub turn_in_flight: bool,
    /// Set once the expert hand-off has been acknowledged.
    pub handoff_completed: bool,
}

impl SessionState {
    /// Number of unresolved placeholders (0 or 1 under single-flight turns).
    pub fn pending_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_pending()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::Assistant, Sender::User] {
            let parsed: Sender = sender.to_string().parse().unwrap();
            assert_eq!(sender, parsed);
        }
        assert!("bot".parse::<Sender>().is_err());
    }

    #[test]
    fn test_finalize_only_once() {
        let mut msg = ChatMessage::placeholder("Thinking...");
        let id = msg.id();
        assert!(msg.is_pending());
        assert!(msg.finalize("Answer"));
        assert!(!msg.is_pending());
        assert_eq!(msg.text(), "Answer");
        assert_eq!(msg.id(), id);

        assert!(!msg.finalize("Changed"));
        assert_eq!(msg.text(), "Answer");
    }

    #[test]
    fn test_user_messages_are_final() {
        let mut msg = ChatMessage::user("hello");
        assert_eq!(msg.sender(), Sender::User);
        assert!(!msg.finalize("nope"));
    }

    #[test]
    fn test_pending_count() {
        let mut state = SessionState::default();
        state.messages.push(ChatMessage::assistant("Hi"));
        state.messages.push(ChatMessage::user("Q"));
        state.messages.push(ChatMessage::placeholder("..."));
        assert_eq!(state.pending_count(), 1);
    }

    #[test]
    fn test_sender_serde() {
        assert_eq!(serde_json::to_string(&Sender::Assistant).unwrap(), "\"assistant\"");
    }
}
