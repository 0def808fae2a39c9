//! First-activation seeding of a session.
//!
//! On activation the persisted log is fetched and replayed. If there is
//! none (or it cannot be fetched) a bootstrap turn with an empty question
//! asks the backend for an opening message and initial suggestions. A
//! latch makes sure this happens at most once per activation however many
//! times activation is triggered.

use std::sync::atomic::{AtomicBool, Ordering};

use adchat_types::chat::{ChatMessage, SessionState};
use adchat_types::config::AssistantConfig;
use adchat_types::subject::SubjectId;
use tracing::{debug, info, warn};

use crate::backend::AssistantBackend;

use super::cell::SessionCell;
use super::log_adapter::{self, LogReplay};
use super::turn::{self, PendingTurn, TurnOutcome};
use super::{quota, suggestions};

/// One-shot guard for bootstrapping.
#[derive(Debug, Default)]
pub struct BootstrapLatch(AtomicBool);

impl BootstrapLatch {
    /// Close the latch. Returns `true` only for the first caller.
    pub fn try_acquire(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_latched(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Open the latch again for the next activation.
    pub fn rearm(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// How a session was seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Replayed from the persisted log; no ask call was made.
    Hydrated { message_count: usize, ask_count: u32 },
    /// Fresh session opened with the backend's greeting.
    Greeted,
    /// The greeting call returned a domain error, shown as the greeting.
    GreetingError { quota_exhausted: bool },
    /// The greeting call failed; a generic connect failure is shown.
    ConnectFailed,
    /// The session was reset before bootstrapping finished.
    Discarded,
    /// The latch was already closed for this activation.
    AlreadyActivated,
}

/// Seed an activation. Callers are responsible for the latch.
pub async fn bootstrap<B: AssistantBackend>(
    cell: &SessionCell,
    backend: &B,
    subject: &SubjectId,
    config: &AssistantConfig,
) -> BootstrapOutcome {
    let epoch = {
        let mut state = cell.lock().await;
        state.turn_in_flight = true;
        cell.epoch()
    };

    let replay = match backend.fetch_history(subject).await {
        Ok(payload) => log_adapter::replay(&payload),
        Err(e) => {
            warn!(subject_id = %subject, error = %e, "History fetch failed, starting fresh");
            LogReplay::Empty
        }
    };

    let mut state = cell.lock().await;
    if !cell.is_current(epoch) {
        debug!(subject_id = %subject, "Session reset during history fetch");
        return BootstrapOutcome::Discarded;
    }

    match replay {
        LogReplay::History { messages, ask_count } => {
            let message_count = messages.len();
            hydrate(&mut state, messages, ask_count, config.default_ask_limit);
            state.turn_in_flight = false;
            info!(
                subject_id = %subject,
                message_count,
                ask_count,
                ask_limit = ?state.ask_limit,
                exhausted = quota::is_exhausted(&state),
                "Session hydrated from history"
            );
            BootstrapOutcome::Hydrated {
                message_count,
                ask_count,
            }
        }
        LogReplay::Empty => {
            let placeholder_id = turn::begin_placeholder(&mut state, &config.thinking_text);
            drop(state);

            info!(subject_id = %subject, "No history, requesting greeting");
            let pending = PendingTurn {
                placeholder_id,
                epoch,
                question: String::new(),
            };
            let outcome = turn::settle(
                cell,
                backend,
                subject,
                pending,
                &config.connect_failure_text,
                config,
            )
            .await;

            match outcome {
                TurnOutcome::Answered => BootstrapOutcome::Greeted,
                TurnOutcome::DomainError { quota_exhausted } => {
                    BootstrapOutcome::GreetingError { quota_exhausted }
                }
                TurnOutcome::TransportFailed => BootstrapOutcome::ConnectFailed,
                TurnOutcome::Discarded | TurnOutcome::Skipped(_) => BootstrapOutcome::Discarded,
            }
        }
    }
}

/// Load replayed history into a session.
///
/// History never carries follow-up suggestions. A replayed count at or
/// above the limit marks the quota as reached straight away.
pub fn hydrate(
    state: &mut SessionState,
    messages: Vec<ChatMessage>,
    ask_count: u32,
    default_limit: u32,
) {
    state.messages = messages;
    state.ask_count = Some(ask_count);
    let limit = *state.ask_limit.get_or_insert(default_limit.max(1));
    suggestions::clear(state);
    if ask_count >= limit {
        quota::mark_limit_reached(state);
    }
}
