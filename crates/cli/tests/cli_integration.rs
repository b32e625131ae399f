//! Integration tests for the badgedesk binary
//!
//! Each test serves an in-memory backend over RPC and drives the real
//! binary against it.

// Test modules
mod common;
mod workflows;
