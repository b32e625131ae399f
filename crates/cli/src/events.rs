//! Field event routing

use crate::forms::{field_table, FieldEvent};
use parking_lot::RwLock;
use preview::PreviewScheduler;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

pub type Handler = Arc<dyn Fn() + Send + Sync>;

/// Handlers keyed by (field id, event)
#[derive(Default)]
pub struct EventRouter {
    handlers: RwLock<HashMap<(String, FieldEvent), Vec<Handler>>>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, field_id: impl Into<String>, event: FieldEvent, handler: Handler) {
        self.handlers
            .write()
            .entry((field_id.into(), event))
            .or_default()
            .push(handler);
    }

    /// Run every handler registered for `field_id` / `event`
    ///
    /// Returns how many handlers ran.
    pub fn dispatch(&self, field_id: &str, event: FieldEvent) -> usize {
        // Clone out so handlers may register more handlers
        let handlers = self
            .handlers
            .read()
            .get(&(field_id.to_string(), event))
            .cloned()
            .unwrap_or_default();

        trace!("{} on {}: {} handler(s)", event, field_id, handlers.len());
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }
}

/// Make every form field schedule its context's preview
pub fn wire_auto_preview(router: &EventRouter, scheduler: &Arc<PreviewScheduler>) {
    for binding in field_table() {
        let scheduler = Arc::clone(scheduler);
        let context = binding.context;
        router.register(binding.id, binding.event, Arc::new(move || scheduler.schedule(context)));
    }
}
