//! Scripted backend shared by the session tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use adchat_types::ask::AskReply;
use adchat_types::error::BackendError;
use adchat_types::subject::SubjectId;
use serde_json::Value;
use tokio::sync::Notify;

use crate::backend::AssistantBackend;

pub(crate) struct MockBackend {
    history: Result<Value, BackendError>,
    replies: Mutex<VecDeque<Result<AskReply, BackendError>>>,
    asked: Mutex<Vec<String>>,
    history_calls: AtomicUsize,
    gate: Option<Notify>,
    history_gate: Option<Notify>,
}

impl MockBackend {
    /// No history (`0`) and no scripted replies.
    pub(crate) fn new() -> Self {
        Self {
            history: Ok(Value::from(0)),
            replies: Mutex::new(VecDeque::new()),
            asked: Mutex::new(Vec::new()),
            history_calls: AtomicUsize::new(0),
            gate: None,
            history_gate: None,
        }
    }

    pub(crate) fn with_history(mut self, history: Result<Value, BackendError>) -> Self {
        self.history = history;
        self
    }

    pub(crate) fn with_replies(self, replies: Vec<Result<AskReply, BackendError>>) -> Self {
        *self.replies.lock().unwrap() = replies.into();
        self
    }

    /// Hold every ask call until [`MockBackend::release`] is called.
    pub(crate) fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    /// Hold every history fetch until [`MockBackend::release_history`] is called.
    pub(crate) fn history_gated(mut self) -> Self {
        self.history_gate = Some(Notify::new());
        self
    }

    pub(crate) fn release_history(&self) {
        if let Some(gate) = &self.history_gate {
            gate.notify_one();
        }
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub(crate) fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    pub(crate) fn ask_calls(&self) -> usize {
        self.asked.lock().unwrap().len()
    }

    pub(crate) fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

impl AssistantBackend for MockBackend {
    async fn fetch_history(&self, _subject: &SubjectId) -> Result<Value, BackendError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.history_gate {
            gate.notified().await;
        }
        self.history.clone()
    }

    async fn ask(&self, _subject: &SubjectId, question: &str) -> Result<AskReply, BackendError> {
        self.asked.lock().unwrap().push(question.to_string());
        let next = self.replies.lock().unwrap().pop_front();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        next.unwrap_or_else(|| Ok(AskReply::answer("default answer")))
    }
}
