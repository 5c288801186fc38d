//! Collection discovery.
//!
//! Produces the names of every collection in the target database at call
//! time. A consistent snapshot is not required; a concurrently-modified
//! database is audited on an eventual-consistency basis. The result is
//! single-use: repeated audits re-invoke discovery.

use idxsweep_core::Result;
use idxsweep_store::Store;
use tracing::debug;

/// Enumerates the collections to audit.
///
/// # Errors
/// Propagates `Error::Connection` without retry when the store cannot be
/// reached; a failed discovery aborts the whole run.
pub async fn discover(store: &dyn Store) -> Result<Vec<String>> {
    let collections = store.list_collections().await?;
    debug!(count = collections.len(), "discovered collections");
    Ok(collections)
}
