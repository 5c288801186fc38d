//! Core types for the idxsweep index audit tool
//!
//! This crate provides the foundational pieces shared across the tool:
//!
//! - **Index model**: typed index descriptors and the text-index
//!   classification predicate
//! - **Audit records**: per-collection results and the aggregate report
//! - **Configuration**: store endpoint configuration management
//! - **Error handling**: unified error types
//!

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod error;
pub mod index;
pub mod report;

// Re-export main types for convenience
pub use config::{Config, StoreConfig};
pub use error::{Error, Result, ResultExt};
pub use index::{classify, Classification, IndexDescriptor, IndexKeyType, PRIMARY_KEY_INDEX};
pub use report::{
    AuditReport, ClassifiedIndex, CollectionAuditRecord, DropError, RemediationOutcome,
};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
