//! Shared model for badgedesk
//!
//! This crate provides:
//! - Form contexts (create / edit / recover)
//! - The `profileData` payload and its assembly from form state
//! - Stored profile and template records
//! - Backend response shapes
//! - Data URI encoding for photos
//! - Date formatting helpers (`DD.MM.YYYY` display, ISO storage)

pub mod context;
pub mod dates;
pub mod photo;
pub mod profile;
pub mod response;
pub mod template;

// Re-exports
pub use context::FormContext;
pub use photo::PhotoFile;
pub use profile::{FormSnapshot, ProfileData, ProfileRecord};
pub use response::{ActionResponse, PreviewResponse};
pub use template::TemplateRecord;

/// Errors raised while building payloads from form state
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Date not in `DD.MM.YYYY`
    #[error("invalid date '{0}': expected DD.MM.YYYY")]
    InvalidDate(String),

    /// Photo file could not be read
    #[error("failed to read photo {path}: {source}")]
    PhotoRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, Error>;
