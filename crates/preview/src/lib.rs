//! Live card previews for badgedesk
//!
//! This crate provides:
//! - A debouncer: one replaceable deferred action per owner (300ms window)
//! - The field reader / preview surface seams to the UI
//! - The preview pipeline (read form, gate on name, call backend, display)
//! - The per-form-context preview scheduler

pub mod debounce;
pub mod pipeline;
pub mod scheduler;
pub mod surface;

#[cfg(test)]
mod testing;

// Re-exports
pub use debounce::{DebounceState, Debouncer, DEBOUNCE_WINDOW};
pub use pipeline::{PreviewOutcome, PreviewPipeline};
pub use scheduler::PreviewScheduler;
pub use surface::{FieldReader, PreviewSurface};

/// Errors surfaced by a field reader
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// Form state could not be read (e.g. the selected photo is gone)
    #[error(transparent)]
    Form(#[from] badge_core::Error),

    #[error("no form registered for context {0}")]
    UnknownForm(badge_core::FormContext),
}
