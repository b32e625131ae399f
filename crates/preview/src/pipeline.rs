//! Preview generation for one form context

use crate::surface::{FieldReader, PreviewSurface};
use backend::Backend;
use badge_core::dates::format_display_date;
use badge_core::{FormContext, PreviewResponse, ProfileData};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// What a preview run ended with
///
/// None of these are errors to the caller: previews are best-effort and
/// failures are only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Image shown on the surface
    Displayed,
    /// Name was empty: no backend call, preview hidden
    Hidden,
    /// Recover form points at a profile that does not exist
    NoProfile,
    /// A newer preview fired for the same context; result dropped
    Stale,
    /// Backend answered `{error}`
    Rejected(String),
    /// Form read or transport failure
    Failed(String),
}

/// Reads a form, asks the backend for a preview and shows it
///
/// Overlapping runs for one context are allowed. Each run takes a ticket when
/// it starts and only touches the surface if no newer run has started since,
/// so the most recently fired request wins regardless of response order.
pub struct PreviewPipeline {
    backend: Arc<dyn Backend>,
    reader: Arc<dyn FieldReader>,
    surface: Arc<dyn PreviewSurface>,
    tickets: [AtomicU64; 3],
}

impl PreviewPipeline {
    pub fn new(
        backend: Arc<dyn Backend>,
        reader: Arc<dyn FieldReader>,
        surface: Arc<dyn PreviewSurface>,
    ) -> Self {
        Self {
            backend,
            reader,
            surface,
            tickets: Default::default(),
        }
    }

    /// Generate and display the preview for `context`
    pub async fn generate(&self, context: FormContext) -> PreviewOutcome {
        let ticket = self.tickets[slot(context)].fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = self.run(context, ticket).await;

        match &outcome {
            PreviewOutcome::Rejected(error) => {
                warn!("Preview for {} form rejected by backend: {}", context, error)
            }
            PreviewOutcome::Failed(error) => {
                warn!("Preview for {} form failed: {}", context, error)
            }
            other => debug!("Preview for {} form (#{}): {:?}", context, ticket, other),
        }

        self.surface.settled(context, &outcome);
        outcome
    }

    async fn run(&self, context: FormContext, ticket: u64) -> PreviewOutcome {
        let mut snapshot = match self.reader.read_fields(context).await {
            Ok(snapshot) => snapshot,
            Err(e) => return PreviewOutcome::Failed(e.to_string()),
        };

        // Recover previews re-issue the stored identity with the form's style
        if context == FormContext::Recover {
            let Some(user_id) = snapshot.user_id.clone() else {
                return PreviewOutcome::NoProfile;
            };

            match self.backend.get_profile_by_id(&user_id).await {
                Ok(Some(profile)) => {
                    snapshot.full_name = profile.full_name;
                    snapshot.organization = profile.organization;
                    snapshot.department = profile.department;
                    snapshot.expiration_date = profile
                        .expiration_date
                        .map(|d| format_display_date(&d))
                        .unwrap_or_default();
                }
                Ok(None) => return PreviewOutcome::NoProfile,
                Err(e) => return PreviewOutcome::Failed(e.to_string()),
            }
        }

        if snapshot.full_name.is_empty() {
            if !self.is_current(context, ticket) {
                return PreviewOutcome::Stale;
            }
            self.surface.hide(context);
            return PreviewOutcome::Hidden;
        }

        match self.reader.read_photo(context).await {
            Ok(photo) => snapshot.photo = photo,
            Err(e) => return PreviewOutcome::Failed(e.to_string()),
        }

        let payload = ProfileData::from_snapshot(&snapshot);
        match self.backend.generate_preview(&payload).await {
            Ok(PreviewResponse::Image { image_data }) => {
                if !self.is_current(context, ticket) {
                    return PreviewOutcome::Stale;
                }
                self.surface.show(context, &image_data);
                PreviewOutcome::Displayed
            }
            Ok(PreviewResponse::Failed { error }) => PreviewOutcome::Rejected(error),
            Err(e) => PreviewOutcome::Failed(e.to_string()),
        }
    }

    fn is_current(&self, context: FormContext, ticket: u64) -> bool {
        self.tickets[slot(context)].load(Ordering::SeqCst) == ticket
    }
}

fn slot(context: FormContext) -> usize {
    match context {
        FormContext::Create => 0,
        FormContext::Edit => 1,
        FormContext::Recover => 2,
    }
}
