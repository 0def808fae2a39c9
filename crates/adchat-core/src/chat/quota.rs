//! Question quota derivation.
//!
//! The session is exhausted when the backend has said so explicitly
//! (`limit_reached`) or when the reported count has met the limit. Nothing
//! here owns state of its own; it reads and updates `SessionState` fields.

use adchat_types::ask::AskReply;
use adchat_types::chat::SessionState;
use tracing::info;

/// Whether no further questions may be asked in this session.
///
/// An explicit `limit_reached` always wins, even when the count is below
/// the limit.
pub fn is_exhausted(state: &SessionState) -> bool {
    if state.limit_reached {
        return true;
    }
    matches!((state.ask_count, state.ask_limit), (Some(count), Some(limit)) if count >= limit)
}

/// Apply the counters carried by a reply, keeping prior values for
/// anything the reply omits.
///
/// A limit is always known afterwards (`default_limit` when neither the
/// reply nor the session had one). Limits below 1 are ignored.
pub fn record_counts(state: &mut SessionState, reply: &AskReply, default_limit: u32) {
    if let Some(count) = reply.ask_count {
        state.ask_count = Some(count);
    }
    state.ask_limit = reply
        .ask_limit
        .filter(|limit| *limit >= 1)
        .or(state.ask_limit)
        .or(Some(default_limit.max(1)));
    if reply.limit_reached == Some(true) {
        mark_limit_reached(state);
    }
}

/// Raise the sticky limit flag.
pub fn mark_limit_reached(state: &mut SessionState) {
    if !state.limit_reached {
        info!(
            ask_count = ?state.ask_count,
            ask_limit = ?state.ask_limit,
            "Question quota reached"
        );
    }
    state.limit_reached = true;
}

/// Heuristic: does a domain error message talk about the quota?
pub fn mentions_limit(text: &str, keywords: &[String]) -> bool {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .any(|k| !k.is_empty() && lowered.contains(&k))
}
