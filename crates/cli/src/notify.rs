//! Notification banner

use parking_lot::Mutex;
use preview::Debouncer;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Notices kept for `drain`; older ones are dropped
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

/// A single banner that hides itself
///
/// Showing a notice replaces the current one and restarts the hide timer.
pub struct Notifier {
    current: Arc<Mutex<Option<Notice>>>,
    history: Mutex<Vec<Notice>>,
    hider: Debouncer,
}

impl Notifier {
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            history: Mutex::new(Vec::new()),
            hider: Debouncer::new(auto_hide),
        }
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        let notice = Notice {
            message: message.into(),
            severity,
        };
        match severity {
            Severity::Success => info!("{}", notice.message),
            Severity::Warning | Severity::Danger => warn!("{}", notice.message),
        }

        *self.current.lock() = Some(notice.clone());
        {
            let mut history = self.history.lock();
            if history.len() == HISTORY_LIMIT {
                history.remove(0);
            }
            history.push(notice);
        }

        let current = Arc::clone(&self.current);
        self.hider.schedule(move || async move {
            current.lock().take();
        });
    }

    /// The visible notice, if any
    pub fn current(&self) -> Option<Notice> {
        self.current.lock().clone()
    }

    /// Notices shown since the last drain, oldest first (at most
    /// [`HISTORY_LIMIT`])
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.history.lock())
    }

    pub fn dismiss(&self) {
        self.hider.cancel();
        self.current.lock().take();
    }
}
