//! Replays the persisted question/answer log as display messages.
//!
//! The history endpoint answers with an array of log entries, the sentinel
//! `0` / `"0"` for "nothing yet", or occasionally something else entirely.
//! Only an array that yields at least one message counts as history; every
//! other shape is treated as no history, never as an error. Entries are
//! decoded one by one so a single malformed row costs only that row.

use adchat_types::chat::ChatMessage;
use adchat_types::log::LogEntry;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Outcome of replaying a history payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogReplay {
    /// A non-empty message sequence plus the number of answered questions.
    History {
        messages: Vec<ChatMessage>,
        ask_count: u32,
    },
    /// No usable history.
    Empty,
}

/// Classify and replay a raw history payload.
pub fn replay(payload: &Value) -> LogReplay {
    let entries = match payload {
        Value::Array(items) if items.is_empty() => return LogReplay::Empty,
        Value::Array(items) => decode_entries(items),
        other => {
            if !is_empty_sentinel(other) {
                debug!(payload = %other, "Unrecognized history payload, treating as no history");
            }
            return LogReplay::Empty;
        }
    };

    replay_entries(entries)
}

/// Decode each array element on its own; unreadable entries are skipped.
fn decode_entries(items: &[Value]) -> Vec<LogEntry> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match LogEntry::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable history entry");
                None
            }
        })
        .collect()
}

/// Replay already-decoded entries.
pub fn replay_entries(mut entries: Vec<LogEntry>) -> LogReplay {
    sort_entries(&mut entries);

    let ask_count = entries.iter().filter(|e| e.has_question()).count();
    let mut messages = Vec::with_capacity(entries.len() * 2);
    for entry in &entries {
        if entry.has_question() {
            messages.push(ChatMessage::user(entry.question.trim()));
        }
        if entry.has_answer() {
            messages.push(ChatMessage::assistant(entry.answer.trim()));
        }
    }

    if messages.is_empty() {
        return LogReplay::Empty;
    }

    LogReplay::History {
        messages,
        ask_count: u32::try_from(ask_count).unwrap_or(u32::MAX),
    }
}

/// Order entries by creation time, falling back to `entry_id`.
///
/// When every entry has a parsable timestamp the key is `(time, entry_id)`.
/// If any timestamp is missing or unparsable, times are not comparable
/// across the log and the whole sequence is ordered by `entry_id` alone,
/// which keeps the order total.
pub fn sort_entries(entries: &mut [LogEntry]) {
    let all_timed = entries.iter().all(|e| e.timestamp().is_some());
    if all_timed {
        entries.sort_by_cached_key(|e| (e.timestamp(), e.entry_id));
    } else {
        entries.sort_by_key(|e| e.entry_id);
    }
}

fn is_empty_sentinel(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim() == "0",
        _ => false,
    }
}
