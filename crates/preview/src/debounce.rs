//! Debounced deferred actions
//!
//! Coalesces bursts of triggers into a single action that runs once the
//! owner has been quiet for the debounce window.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Quiescence window before a preview request fires
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Whether a deferred action is waiting to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending,
}

#[derive(Default)]
struct Slot {
    /// Id handed to the most recently scheduled action
    last_id: u64,
    /// Timer task of the pending action, with its id
    pending: Option<(u64, JoinHandle<()>)>,
}

/// One replaceable deferred action
///
/// At most one action is pending at a time. Scheduling a new action aborts
/// the pending one and restarts the window. Once an action fires it is no
/// longer pending: later scheduling never cancels an action that is already
/// running.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer {
    window: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Replace any pending action with `action`, to run after the window
    pub fn schedule<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        // Held across the spawn so the timer task cannot observe the slot
        // before its own handle is stored.
        let mut slot = self.slot.lock();

        if let Some((id, handle)) = slot.pending.take() {
            trace!("Debounce: superseding pending action {}", id);
            handle.abort();
        }

        slot.last_id += 1;
        let id = slot.last_id;
        let window = self.window;
        let shared = Arc::clone(&self.slot);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;

            {
                let mut slot = shared.lock();
                let current = matches!(&slot.pending, Some((pending_id, _)) if *pending_id == id);
                if !current {
                    return;
                }
                slot.pending = None;
            }

            trace!("Debounce: firing action {}", id);
            action().await;
        });

        slot.pending = Some((id, handle));
    }

    /// Drop the pending action, if any. Returns true if one was pending.
    pub fn cancel(&self) -> bool {
        match self.slot.lock().pending.take() {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> DebounceState {
        if self.slot.lock().pending.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Idle
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
