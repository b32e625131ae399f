//! Preview panes for the three forms

use badge_core::FormContext;
use parking_lot::Mutex;
use preview::{PreviewOutcome, PreviewSurface};
use std::collections::HashMap;
use tokio::sync::watch;

/// Last finished preview run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub context: FormContext,
    pub outcome: PreviewOutcome,
}

/// Holds the image each form currently shows
///
/// A hidden pane shows its placeholder instead. Every finished preview run is
/// published on a watch channel.
pub struct PreviewPane {
    images: Mutex<HashMap<FormContext, String>>,
    settled: watch::Sender<Option<Settled>>,
}

impl Default for PreviewPane {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewPane {
    pub fn new() -> Self {
        let (settled, _) = watch::channel(None);
        Self {
            images: Mutex::new(HashMap::new()),
            settled,
        }
    }

    /// Image data URI shown for `context`, `None` while the placeholder is up
    pub fn image(&self, context: FormContext) -> Option<String> {
        self.images.lock().get(&context).cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Settled>> {
        self.settled.subscribe()
    }
}

impl PreviewSurface for PreviewPane {
    fn show(&self, context: FormContext, image_data: &str) {
        self.images.lock().insert(context, image_data.to_string());
    }

    fn hide(&self, context: FormContext) {
        self.images.lock().remove(&context);
    }

    fn settled(&self, context: FormContext, outcome: &PreviewOutcome) {
        self.settled.send_replace(Some(Settled {
            context,
            outcome: outcome.clone(),
        }));
    }
}
