//! Library interface for the idxsweep CLI
//!
//! This module exposes the report rendering for integration testing while
//! keeping the binary logic in main.rs.

pub mod report;

// Re-export commonly needed types for tests
pub use anyhow::Result;
pub use idxsweep_core::Config;
