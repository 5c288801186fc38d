use thiserror::Error;

/// Result type for idxsweep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for idxsweep operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cannot reach or authenticate to the store; fatal to the run
    #[error("Connection error: {0}")]
    Connection(String),

    /// Store-side failure during a single request
    #[error("Store error: {0}")]
    Store(String),

    /// A drop targeted an index the store no longer has
    #[error("Index not found: {index} on collection {collection}")]
    IndexNotFound { collection: String, index: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Creates an index-not-found error
    pub fn index_not_found(collection: impl Into<String>, index: impl Into<String>) -> Self {
        Self::IndexNotFound {
            collection: collection.into(),
            index: index.into(),
        }
    }

    /// True for errors that abort the whole run rather than a single step
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}
