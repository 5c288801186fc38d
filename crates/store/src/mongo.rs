//! MongoDB backend for the [`Store`](crate::Store) capability.
//!
//! Index metadata comes back from `listIndexes` as raw driver models; this
//! module converts them into the typed descriptors the auditor consumes and
//! maps driver failures onto the core error taxonomy.

use crate::error::StoreError;
use crate::Store;
use async_trait::async_trait;
use futures::TryStreamExt;
use idxsweep_core::{Error, IndexDescriptor, IndexKeyType, StoreConfig};
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::{Client, Database, IndexModel};
use tracing::{debug, info};

/// Server error code returned when dropping an index that does not exist
const INDEX_NOT_FOUND_CODE: i32 = 27;

pub(crate) struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connects and verifies liveness with a ping so a bad endpoint fails
    /// before any audit work starts
    pub(crate) async fn connect(config: &StoreConfig) -> Result<Self, Error> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| StoreError::InvalidConfig(format!("invalid store endpoint: {e}")))?;

        let db = client.database(&config.database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::ConnectionFailed(format!("cannot reach {}: {e}", config.uri)))?;

        info!(database = %config.database, "connected to store");
        Ok(Self { db })
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn list_collections(&self) -> Result<Vec<String>, Error> {
        let names = self
            .db
            .list_collection_names()
            .await
            .map_err(map_discovery_error)?;
        Ok(names)
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexDescriptor>, Error> {
        let cursor = self
            .db
            .collection::<Document>(collection)
            .list_indexes()
            .await
            .map_err(|e| StoreError::BackendError(format!("listIndexes on {collection}: {e}")))?;

        let models: Vec<IndexModel> = cursor.try_collect().await.map_err(|e| {
            StoreError::BackendError(format!("listIndexes cursor on {collection}: {e}"))
        })?;

        let descriptors = models.into_iter().map(descriptor_from_model).collect();
        debug!(collection, "listed indexes");
        Ok(descriptors)
    }

    async fn drop_index(&self, collection: &str, index_name: &str) -> Result<(), Error> {
        self.db
            .collection::<Document>(collection)
            .drop_index(index_name)
            .await
            .map_err(|e| map_drop_error(e, collection, index_name))?;
        Ok(())
    }
}

fn map_discovery_error(err: MongoError) -> StoreError {
    match *err.kind {
        ErrorKind::ServerSelection { ref message, .. } => {
            StoreError::ConnectionFailed(message.clone())
        }
        ErrorKind::Authentication { ref message, .. } => {
            StoreError::ConnectionFailed(message.clone())
        }
        ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
            StoreError::ConnectionFailed(err.to_string())
        }
        _ => StoreError::ConnectionFailed(format!("listCollections failed: {err}")),
    }
}

fn map_drop_error(err: MongoError, collection: &str, index_name: &str) -> StoreError {
    match *err.kind {
        ErrorKind::Command(ref command_err) if command_err.code == INDEX_NOT_FOUND_CODE => {
            StoreError::IndexNotFound {
                collection: collection.to_string(),
                index: index_name.to_string(),
            }
        }
        ErrorKind::Command(ref command_err) => StoreError::BackendError(command_err.message.clone()),
        _ => StoreError::BackendError(err.to_string()),
    }
}

fn descriptor_from_model(model: IndexModel) -> IndexDescriptor {
    let (name, default_language) = match model.options {
        Some(options) => (options.name, options.default_language),
        None => (None, None),
    };
    descriptor_from_parts(&model.keys, name, default_language)
}

/// Builds a typed descriptor from the raw key document and options fields.
///
/// A missing name is synthesized the way the server does, by joining
/// `field_token` pairs.
fn descriptor_from_parts(
    keys: &Document,
    name: Option<String>,
    default_language: Option<String>,
) -> IndexDescriptor {
    let key_spec: Vec<(String, IndexKeyType)> = keys
        .iter()
        .map(|(field, value)| (field.clone(), key_type_from_bson(value)))
        .collect();

    let name = name.unwrap_or_else(|| {
        key_spec
            .iter()
            .map(|(field, key_type)| format!("{field}_{key_type}"))
            .collect::<Vec<_>>()
            .join("_")
    });

    IndexDescriptor {
        name,
        key_spec,
        default_language,
    }
}

fn key_type_from_bson(value: &Bson) -> IndexKeyType {
    match value {
        Bson::String(token) => IndexKeyType::from_token(token),
        Bson::Int32(n) => key_type_from_i64(i64::from(*n)),
        Bson::Int64(n) => key_type_from_i64(*n),
        Bson::Double(n) if n.fract() == 0.0 => key_type_from_i64(*n as i64),
        other => IndexKeyType::Other(other.to_string()),
    }
}

fn key_type_from_i64(n: i64) -> IndexKeyType {
    match n {
        1 => IndexKeyType::Ascending,
        -1 => IndexKeyType::Descending,
        other => IndexKeyType::Other(other.to_string()),
    }
}
