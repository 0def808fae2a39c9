//! Follow-up suggestion list.
//!
//! The list always mirrors the latest successful reply and is forced empty
//! whenever the quota is exhausted. Call [`enforce`] after any change to
//! the quota fields.

use std::collections::HashSet;

use adchat_types::chat::SessionState;

use super::quota;

/// Replace the suggestions with a fresh list from a reply.
///
/// Entries are trimmed, blanks dropped and duplicates removed keeping the
/// first occurrence.
pub fn replace(state: &mut SessionState, incoming: Option<&[String]>) {
    let mut seen = HashSet::new();
    state.suggestions = incoming
        .unwrap_or_default()
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(s.to_string()))
        .map(str::to_string)
        .collect();
    enforce(state);
}

/// Drop all suggestions.
pub fn clear(state: &mut SessionState) {
    state.suggestions.clear();
}

/// Clear the list if the quota is exhausted.
pub fn enforce(state: &mut SessionState) {
    if quota::is_exhausted(state) {
        clear(state);
    }
}

/// Text of the suggestion at `index`, if it exists and may be asked.
pub fn select(state: &SessionState, index: usize) -> Option<String> {
    if quota::is_exhausted(state) {
        return None;
    }
    state.suggestions.get(index).cloned()
}
