//! In-memory store used for the "mock" provider and by pipeline tests.
//!
//! Unlike a pure stub this fake keeps real state: successful drops remove
//! the descriptor, so a second audit pass over the same instance observes
//! the remediated database. Failures are scripted per collection or per
//! (collection, index) pair.

use crate::Store;
use async_trait::async_trait;
use idxsweep_core::{Error, IndexDescriptor};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct MockState {
    /// Collection name to descriptors, in insertion order
    collections: Vec<(String, Vec<IndexDescriptor>)>,
    /// Collections whose listIndexes is scripted to fail, with the message
    listing_failures: HashMap<String, String>,
    /// (collection, index) drops scripted to fail, with the message
    drop_failures: HashMap<(String, String), String>,
    /// Every dropIndex call observed, successful or not
    drop_calls: Vec<(String, String)>,
    unreachable: bool,
}

#[derive(Default)]
pub struct MockStore {
    state: Mutex<MockState>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a collection with its index descriptors
    pub fn with_collection(self, name: impl Into<String>, indexes: Vec<IndexDescriptor>) -> Self {
        self.lock().collections.push((name.into(), indexes));
        self
    }

    /// Scripts listIndexes on a collection to fail
    pub fn with_listing_failure(
        self,
        collection: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.lock()
            .listing_failures
            .insert(collection.into(), message.into());
        self
    }

    /// Scripts one index's drop to fail
    pub fn with_drop_failure(
        self,
        collection: impl Into<String>,
        index: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.lock()
            .drop_failures
            .insert((collection.into(), index.into()), message.into());
        self
    }

    /// Makes every call fail as unreachable
    pub fn unreachable(self) -> Self {
        self.lock().unreachable = true;
        self
    }

    /// Every dropIndex call observed so far, in order
    pub fn drop_calls(&self) -> Vec<(String, String)> {
        self.lock().drop_calls.clone()
    }

    /// Current descriptors of one collection, if it exists
    pub fn indexes(&self, collection: &str) -> Option<Vec<IndexDescriptor>> {
        self.lock()
            .collections
            .iter()
            .find(|(name, _)| name == collection)
            .map(|(_, indexes)| indexes.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl Store for MockStore {
    async fn list_collections(&self) -> Result<Vec<String>, Error> {
        let state = self.lock();
        if state.unreachable {
            return Err(Error::connection("mock store is unreachable"));
        }
        Ok(state
            .collections
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexDescriptor>, Error> {
        let state = self.lock();
        if state.unreachable {
            return Err(Error::connection("mock store is unreachable"));
        }
        if let Some(message) = state.listing_failures.get(collection) {
            return Err(Error::store(message.clone()));
        }
        state
            .collections
            .iter()
            .find(|(name, _)| name == collection)
            .map(|(_, indexes)| indexes.clone())
            .ok_or_else(|| Error::store(format!("collection not found: {collection}")))
    }

    async fn drop_index(&self, collection: &str, index_name: &str) -> Result<(), Error> {
        let mut state = self.lock();
        state
            .drop_calls
            .push((collection.to_string(), index_name.to_string()));

        if state.unreachable {
            return Err(Error::connection("mock store is unreachable"));
        }
        if let Some(message) = state
            .drop_failures
            .get(&(collection.to_string(), index_name.to_string()))
        {
            return Err(Error::store(message.clone()));
        }

        let indexes = state
            .collections
            .iter_mut()
            .find(|(name, _)| name == collection)
            .map(|(_, indexes)| indexes)
            .ok_or_else(|| Error::store(format!("collection not found: {collection}")))?;

        let position = indexes
            .iter()
            .position(|descriptor| descriptor.name == index_name)
            .ok_or_else(|| Error::index_not_found(collection, index_name))?;
        indexes.remove(position);
        Ok(())
    }
}
