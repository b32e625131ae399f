//! Per-form-context preview scheduling

use crate::debounce::{DebounceState, Debouncer, DEBOUNCE_WINDOW};
use crate::pipeline::PreviewPipeline;
use badge_core::FormContext;
use std::sync::Arc;
use tracing::debug;

/// Debounces preview requests separately for each form context
///
/// Each context owns its own debouncer, so edits in one form never delay or
/// cancel the preview of another.
pub struct PreviewScheduler {
    pipeline: Arc<PreviewPipeline>,
    create: Debouncer,
    edit: Debouncer,
    recover: Debouncer,
}

impl PreviewScheduler {
    pub fn new(pipeline: Arc<PreviewPipeline>) -> Self {
        Self {
            pipeline,
            create: Debouncer::new(DEBOUNCE_WINDOW),
            edit: Debouncer::new(DEBOUNCE_WINDOW),
            recover: Debouncer::new(DEBOUNCE_WINDOW),
        }
    }

    /// Request a preview for `context`, replacing any pending request
    ///
    /// The preview is generated once no further request for the same context
    /// has arrived for the debounce window; field values are read then.
    pub fn schedule(&self, context: FormContext) {
        debug!("Preview scheduled for {} form", context);
        let pipeline = Arc::clone(&self.pipeline);
        self.debouncer(context).schedule(move || async move {
            pipeline.generate(context).await;
        });
    }

    /// Drop the pending request for `context`
    pub fn cancel(&self, context: FormContext) -> bool {
        self.debouncer(context).cancel()
    }

    pub fn state(&self, context: FormContext) -> DebounceState {
        self.debouncer(context).state()
    }

    pub fn pipeline(&self) -> &Arc<PreviewPipeline> {
        &self.pipeline
    }

    fn debouncer(&self, context: FormContext) -> &Debouncer {
        match context {
            FormContext::Create => &self.create,
            FormContext::Edit => &self.edit,
            FormContext::Recover => &self.recover,
        }
    }
}
