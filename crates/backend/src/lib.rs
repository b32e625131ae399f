//! Backend facade for badgedesk
//!
//! This crate provides:
//! - The `Backend` trait: every remote operation the UI layer calls
//! - A JSON-lines RPC client (`RpcClient`) and server (`RpcServer`)
//! - An in-memory `LoopbackBackend` for tests and local demos

pub mod client;
pub mod loopback;
pub mod rpc;
pub mod server;

use async_trait::async_trait;
use badge_core::{ActionResponse, PreviewResponse, ProfileData, ProfileRecord, TemplateRecord};
use std::time::Duration;

// Re-exports
pub use client::RpcClient;
pub use loopback::LoopbackBackend;
pub use rpc::Method;
pub use server::RpcServer;

/// Errors raised while talking to the backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed message: {0}")]
    Codec(#[from] serde_json::Error),

    /// The backend answered with an error instead of a result
    #[error("backend error: {0}")]
    Remote(String),

    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("invalid params for {method}: {reason}")]
    InvalidParams { method: String, reason: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection closed by backend")]
    Closed,

    #[error("response id mismatch: expected {expected}, got {got}")]
    IdMismatch { expected: u64, got: u64 },
}

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Operations exposed by the backend process
///
/// An `Err` means the call itself failed (transport, codec, remote fault).
/// Domain failures come back inside `Ok`, as `PreviewResponse::Failed` or an
/// `ActionResponse` with `success == false`.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn generate_preview(&self, data: &ProfileData) -> Result<PreviewResponse>;

    async fn create_profile(&self, data: &ProfileData) -> Result<ActionResponse>;

    /// `data.user_id` selects the profile
    async fn update_profile(&self, data: &ProfileData) -> Result<ActionResponse>;

    async fn recover_profile(&self, user_id: &str, data: &ProfileData) -> Result<ActionResponse>;

    async fn delete_profile(&self, user_id: &str) -> Result<ActionResponse>;

    /// Blank term returns every profile
    async fn search_profiles(&self, term: &str) -> Result<Vec<ProfileRecord>>;

    async fn get_profile_by_id(&self, user_id: &str) -> Result<Option<ProfileRecord>>;

    async fn get_profiles_count(&self) -> Result<u64>;

    async fn get_available_fonts(&self) -> Result<Vec<String>>;

    async fn get_available_patterns(&self) -> Result<Vec<String>>;

    async fn get_templates(&self) -> Result<Vec<TemplateRecord>>;

    async fn save_template(&self, template: &TemplateRecord) -> Result<bool>;

    async fn load_template(&self, name: &str) -> Result<Option<TemplateRecord>>;

    async fn delete_template(&self, name: &str) -> Result<bool>;

    async fn preview_template(&self, name: &str) -> Result<PreviewResponse>;

    /// Today + 30 days as `DD.MM.YYYY`
    async fn get_30_days_date(&self) -> Result<String>;
}
