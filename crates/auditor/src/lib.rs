#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Audit pipeline: discovery of collections and per-collection
//! classification and remediation of disallowed text indexes.
//!
//! Collections are processed one at a time, in discovery order; there is
//! no parallelism across collections or across index drops.

pub mod audit;
pub mod discovery;

pub use audit::{audit_collection, run_audit};
pub use discovery::discover;
