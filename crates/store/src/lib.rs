#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Store capability consumed by the audit pipeline.
//!
//! The trait deliberately covers only the three operations the audit needs:
//! collection enumeration, index listing, and index dropping. Connection
//! establishment and retry policy live behind the factory.

pub mod error;
mod factory;
pub mod mock;

// Keep the MongoDB backend module private
mod mongo;

// Export factory functions
pub use factory::create_store;

use async_trait::async_trait;
use idxsweep_core::{Error, IndexDescriptor};

#[async_trait]
pub trait Store: Send + Sync {
    /// Names of every collection in the target database at call time
    async fn list_collections(&self) -> Result<Vec<String>, Error>;

    /// Index descriptors for one collection, in store order
    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexDescriptor>, Error>;

    /// Drops one index by name
    async fn drop_index(&self, collection: &str, index_name: &str) -> Result<(), Error>;
}
