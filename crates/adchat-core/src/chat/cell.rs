//! Shared holder for one activation's `SessionState`.
//!
//! The state sits behind an async mutex that is never held across a
//! backend call. Each reset bumps an epoch so work started before the
//! reset can recognise that its session is gone.

use std::sync::atomic::{AtomicU64, Ordering};

use adchat_types::chat::SessionState;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct SessionCell {
    state: Mutex<SessionState>,
    epoch: AtomicU64,
}

impl SessionCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }

    /// Current activation epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Whether `epoch` still names the live activation.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch() == epoch
    }

    /// Discard all state and start a new epoch.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        *state = SessionState::default();
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}
