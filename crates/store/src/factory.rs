use crate::{mock::MockStore, mongo::MongoStore, Store};
use idxsweep_core::{Error, StoreConfig};
use std::sync::Arc;

/// Creates a store from configuration.
///
/// Returns a trait object so the audit pipeline stays independent of the
/// backend. Connection liveness is verified here; a bad endpoint surfaces
/// as `Error::Connection` before any audit work starts.
///
/// The caller owns the handle; dropping the `Arc` releases the connection
/// on every exit path.
///
/// # Errors
/// `Error::Connection` when the backend cannot be reached, `Error::Config`
/// for an unknown provider.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn Store>, Error> {
    match config.provider.as_str() {
        "mongodb" => {
            let store = MongoStore::connect(config).await?;
            Ok(Arc::new(store) as Arc<dyn Store>)
        }
        "mock" => Ok(Arc::new(MockStore::new()) as Arc<dyn Store>),
        other => Err(Error::config(format!("unknown store provider: {other}"))),
    }
}
