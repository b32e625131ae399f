//! Seams between the preview pipeline and the UI

use crate::pipeline::PreviewOutcome;
use crate::PreviewError;
use async_trait::async_trait;
use badge_core::{FormContext, FormSnapshot, PhotoFile};

/// Reads the current field values of a form
///
/// Loading the photo is separate from reading the fields so a preview can
/// be gated on the name before touching the photo file.
#[async_trait]
pub trait FieldReader: Send + Sync {
    /// Snapshot of the context's form without photo bytes
    async fn read_fields(&self, context: FormContext) -> Result<FormSnapshot, PreviewError>;

    /// The photo selected in the context's form
    async fn read_photo(&self, context: FormContext) -> Result<Option<PhotoFile>, PreviewError>;

    /// Snapshot of the context's form, photo bytes included
    async fn read(&self, context: FormContext) -> Result<FormSnapshot, PreviewError> {
        let mut snapshot = self.read_fields(context).await?;
        snapshot.photo = self.read_photo(context).await?;
        Ok(snapshot)
    }
}

/// Where preview images are shown
pub trait PreviewSurface: Send + Sync {
    /// Display `image_data` (a data URI) as the context's preview
    fn show(&self, context: FormContext, image_data: &str);

    /// Hide the context's preview image
    fn hide(&self, context: FormContext);

    /// Called once per preview run, after `show`/`hide` if either happened
    fn settled(&self, _context: FormContext, _outcome: &PreviewOutcome) {}
}
