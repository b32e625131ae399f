//! Workflow integration tests
//!
//! Tests for complete workflows that exercise multiple commands
//! and validate end-to-end behavior.

pub mod profile_lifecycle;
pub mod preview;
pub mod templates;
