//! `ChatSession` -- one assistant conversation about one subject.
//!
//! Wires the bootstrap latch, the session cell and the backend together and
//! exposes the operations a UI needs: activate, submit, pick a suggestion,
//! reset on close, complete an expert hand-off, and read a snapshot.

use adchat_types::chat::{ChatMessage, SessionState};
use adchat_types::config::AssistantConfig;
use adchat_types::subject::SubjectId;
use tracing::info;

use crate::backend::AssistantBackend;

use super::bootstrap::{self, BootstrapLatch, BootstrapOutcome};
use super::cell::SessionCell;
use super::turn::{self, SkipReason, TurnOutcome};
use super::{quota, suggestions};

/// Read-only view of a session for rendering.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub subject: SubjectId,
    pub messages: Vec<ChatMessage>,
    pub suggestions: Vec<String>,
    pub ask_count: Option<u32>,
    pub ask_limit: Option<u32>,
    pub exhausted: bool,
    pub in_flight: bool,
    pub activated: bool,
    pub handoff_completed: bool,
}

/// A single-subject assistant conversation.
///
/// All operations take `&self`; the session state is only locked around
/// mutations, never across a backend call.
pub struct ChatSession<B: AssistantBackend> {
    subject: SubjectId,
    backend: B,
    config: AssistantConfig,
    cell: SessionCell,
    latch: BootstrapLatch,
}

impl<B: AssistantBackend> ChatSession<B> {
    pub fn new(subject: SubjectId, backend: B, config: AssistantConfig) -> Self {
        Self {
            subject,
            backend,
            config,
            cell: SessionCell::new(),
            latch: BootstrapLatch::default(),
        }
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Bootstrap the session. Only the first call per activation does work.
    pub async fn activate(&self) -> BootstrapOutcome {
        if !self.latch.try_acquire() {
            return BootstrapOutcome::AlreadyActivated;
        }
        info!(subject_id = %self.subject, "Activating assistant session");
        bootstrap::bootstrap(&self.cell, &self.backend, &self.subject, &self.config).await
    }

    /// Ask a question.
    pub async fn submit(&self, question: &str) -> TurnOutcome {
        if !self.latch.is_latched() {
            return TurnOutcome::Skipped(SkipReason::NotActivated);
        }
        turn::execute(&self.cell, &self.backend, &self.subject, question, &self.config).await
    }

    /// Ask the suggestion at `index` of the current list.
    pub async fn select_suggestion(&self, index: usize) -> TurnOutcome {
        let picked = {
            let state = self.cell.lock().await;
            suggestions::select(&state, index)
        };
        match picked {
            Some(question) => self.submit(&question).await,
            None => TurnOutcome::Skipped(SkipReason::UnknownSuggestion),
        }
    }

    /// Deactivate: drop all state and allow a later activation.
    ///
    /// A reply still in flight will find its session gone and be dropped.
    pub async fn reset(&self) {
        self.cell.reset().await;
        self.latch.rearm();
        info!(subject_id = %self.subject, "Assistant session reset");
    }

    /// Record that the expert hand-off request was submitted.
    ///
    /// Only meaningful once the quota is exhausted, and only once per
    /// activation; returns `false` and does nothing otherwise.
    pub async fn complete_handoff(&self) -> bool {
        let mut state = self.cell.lock().await;
        if !quota::is_exhausted(&state) || state.handoff_completed {
            return false;
        }
        state.handoff_completed = true;
        state
            .messages
            .push(ChatMessage::assistant(self.config.handoff_text.clone()));
        info!(subject_id = %self.subject, "Expert hand-off completed");
        true
    }

    pub async fn is_exhausted(&self) -> bool {
        quota::is_exhausted(&*self.cell.lock().await)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.cell.lock().await;
        self.snapshot_of(&state)
    }

    fn snapshot_of(&self, state: &SessionState) -> SessionSnapshot {
        SessionSnapshot {
            subject: self.subject.clone(),
            messages: state.messages.clone(),
            suggestions: state.suggestions.clone(),
            ask_count: state.ask_count,
            ask_limit: state.ask_limit,
            exhausted: quota::is_exhausted(state),
            in_flight: state.turn_in_flight,
            activated: self.latch.is_latched(),
            handoff_completed: state.handoff_completed,
        }
    }
}
