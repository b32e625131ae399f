//! badgedesk interaction layer
//!
//! This crate provides:
//! - Application configuration (`config`)
//! - Form state and the field binding table (`forms`)
//! - Field event routing and auto-preview wiring (`events`)
//! - The self-hiding notification banner (`notify`)
//! - Preview panes (`pane`) and the profile table (`table`)
//! - The controller implementing every user action (`controller`)

pub mod config;
pub mod controller;
pub mod events;
pub mod forms;
pub mod notify;
pub mod pane;
pub mod table;

// Re-exports
pub use config::AppConfig;
pub use controller::{Controller, View};
pub use events::EventRouter;
pub use forms::{FieldEvent, FieldValue, FormField, FormStore};
pub use notify::{Notice, Notifier, Severity};
pub use pane::PreviewPane;
