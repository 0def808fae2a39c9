//! One question/answer round trip.
//!
//! A turn appends the user's question, appends a pending assistant
//! placeholder, calls the backend with the session lock released, then
//! finalizes the placeholder in place with whatever came back. Only one
//! turn may be in flight per session; further submissions are skipped
//! until it settles. Every completed path leaves no pending message behind.

use adchat_types::ask::AskReply;
use adchat_types::chat::{ChatMessage, SessionState};
use adchat_types::config::AssistantConfig;
use adchat_types::error::BackendError;
use adchat_types::subject::SubjectId;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::AssistantBackend;

use super::cell::SessionCell;
use super::{quota, suggestions};

/// Why a submission was ignored. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyQuestion,
    TurnInFlight,
    QuotaExhausted,
    NotActivated,
    UnknownSuggestion,
}

/// What a submission did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The placeholder now holds the backend's answer.
    Answered,
    /// The placeholder now holds the backend's error text.
    DomainError { quota_exhausted: bool },
    /// The request failed; the placeholder holds the generic failure text.
    TransportFailed,
    /// The session was reset while the request was outstanding.
    Discarded,
    Skipped(SkipReason),
}

/// A placeholder waiting for its backend reply.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub placeholder_id: Uuid,
    pub epoch: u64,
    pub question: String,
}

/// Validate a submission and append the question plus a placeholder.
///
/// Returns the trimmed question and the placeholder id on success.
pub fn begin_question(
    state: &mut SessionState,
    question: &str,
    thinking_text: &str,
) -> Result<(String, Uuid), SkipReason> {
    let question = question.trim();
    if question.is_empty() {
        return Err(SkipReason::EmptyQuestion);
    }
    if state.turn_in_flight {
        return Err(SkipReason::TurnInFlight);
    }
    if quota::is_exhausted(state) {
        return Err(SkipReason::QuotaExhausted);
    }

    state.messages.push(ChatMessage::user(question));
    let placeholder_id = begin_placeholder(state, thinking_text);
    Ok((question.to_string(), placeholder_id))
}

/// Append a pending assistant placeholder and mark the session busy.
pub fn begin_placeholder(state: &mut SessionState, thinking_text: &str) -> Uuid {
    let placeholder = ChatMessage::placeholder(thinking_text);
    let id = placeholder.id();
    state.messages.push(placeholder);
    state.turn_in_flight = true;
    id
}

/// Integrate a backend result into the session.
///
/// The placeholder is located by scanning from the tail for the nearest
/// pending message; if that is not `placeholder_id` the result is dropped.
/// `failure_text` is used when the request itself failed.
pub fn complete(
    state: &mut SessionState,
    placeholder_id: Uuid,
    result: Result<AskReply, BackendError>,
    failure_text: &str,
    config: &AssistantConfig,
) -> TurnOutcome {
    state.turn_in_flight = false;

    let Some(pos) = state.messages.iter().rposition(ChatMessage::is_pending) else {
        return TurnOutcome::Discarded;
    };
    if state.messages[pos].id() != placeholder_id {
        return TurnOutcome::Discarded;
    }

    match result {
        Ok(reply) => match reply.error.as_deref() {
            Some(error) => {
                state.messages[pos].finalize(error);

                let by_text = quota::mentions_limit(error, &config.limit_keywords);
                let by_flag = reply.limit_reached == Some(true);
                quota::record_counts(state, &reply, config.default_ask_limit);
                if by_text || by_flag {
                    quota::mark_limit_reached(state);
                    suggestions::clear(state);
                }
                suggestions::enforce(state);

                TurnOutcome::DomainError {
                    quota_exhausted: quota::is_exhausted(state),
                }
            }
            None => {
                let answer = reply
                    .answer
                    .as_deref()
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .unwrap_or(config.empty_answer_text.as_str());
                state.messages[pos].finalize(answer);

                quota::record_counts(state, &reply, config.default_ask_limit);
                suggestions::replace(state, reply.suggestions.as_deref());

                TurnOutcome::Answered
            }
        },
        Err(_) => {
            state.messages[pos].finalize(failure_text);
            TurnOutcome::TransportFailed
        }
    }
}

/// Call the backend for a turn that has already been begun and settle it.
pub async fn settle<B: AssistantBackend>(
    cell: &SessionCell,
    backend: &B,
    subject: &SubjectId,
    turn: PendingTurn,
    failure_text: &str,
    config: &AssistantConfig,
) -> TurnOutcome {
    let result = backend.ask(subject, &turn.question).await;

    match &result {
        Ok(reply) if reply.is_error() => {
            info!(subject_id = %subject, error = ?reply.error, "Assistant returned a domain error");
        }
        Ok(_) => {}
        Err(e) => warn!(subject_id = %subject, error = %e, "Ask request failed"),
    }

    let mut state = cell.lock().await;
    if !cell.is_current(turn.epoch) {
        debug!(subject_id = %subject, "Dropping reply for a session that was reset");
        return TurnOutcome::Discarded;
    }
    complete(&mut state, turn.placeholder_id, result, failure_text, config)
}

/// Run one user turn end to end.
///
/// Submissions that are blank, overlap an in-flight turn, or arrive after
/// the quota ran out are skipped without touching the session or the backend.
pub async fn execute<B: AssistantBackend>(
    cell: &SessionCell,
    backend: &B,
    subject: &SubjectId,
    question: &str,
    config: &AssistantConfig,
) -> TurnOutcome {
    let turn = {
        let mut state = cell.lock().await;
        match begin_question(&mut state, question, &config.thinking_text) {
            Ok((question, placeholder_id)) => PendingTurn {
                placeholder_id,
                epoch: cell.epoch(),
                question,
            },
            Err(reason) => {
                debug!(subject_id = %subject, ?reason, "Submission skipped");
                return TurnOutcome::Skipped(reason);
            }
        }
    };

    let outcome = settle(
        cell,
        backend,
        subject,
        turn,
        &config.transport_failure_text,
        config,
    )
    .await;
    debug!(subject_id = %subject, ?outcome, "Turn settled");
    outcome
}
