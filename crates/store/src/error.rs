use idxsweep_core::Error as CoreError;
use thiserror::Error;

/// Store-specific error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Index not found: {index} on collection {collection}")]
    IndexNotFound { collection: String, index: String },

    #[error("Store backend error: {0}")]
    BackendError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionFailed(msg) => CoreError::connection(msg),
            StoreError::IndexNotFound { collection, index } => {
                CoreError::index_not_found(collection, index)
            }
            StoreError::InvalidConfig(msg) => CoreError::config(msg),
            other => CoreError::store(other.to_string()),
        }
    }
}
