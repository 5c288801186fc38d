//! Typed index metadata and the classification predicate.
//!
//! An [`IndexDescriptor`] is an immutable snapshot of one index as read from
//! the store at discovery time. Classification is a pure function of the key
//! specification; nothing else about the descriptor may influence it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the store's implicit primary-key index.
///
/// The store creates it on every collection and refuses to drop it; this tool
/// additionally excludes it from remediation outright.
pub const PRIMARY_KEY_INDEX: &str = "_id_";

/// The per-field type token of an index key specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKeyType {
    /// Ascending order key ("1")
    Ascending,
    /// Descending order key ("-1")
    Descending,
    /// Free-text search key ("text")
    Text,
    /// Any other token, e.g. "2dsphere" or "hashed"
    Other(String),
}

impl IndexKeyType {
    /// Parses a string type token as reported by the store
    pub fn from_token(token: &str) -> Self {
        match token {
            "1" => Self::Ascending,
            "-1" => Self::Descending,
            "text" => Self::Text,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for IndexKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "1"),
            Self::Descending => write!(f, "-1"),
            Self::Text => write!(f, "text"),
            Self::Other(token) => write!(f, "{token}"),
        }
    }
}

/// Immutable snapshot of one index on a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Index name, unique within its collection
    pub name: String,

    /// Field-to-type mapping in the order the store reported it
    pub key_spec: Vec<(String, IndexKeyType)>,

    /// Language setting on text indexes; descriptive metadata only,
    /// never an input to classification
    pub default_language: Option<String>,
}

impl IndexDescriptor {
    pub fn new(name: impl Into<String>, key_spec: Vec<(String, IndexKeyType)>) -> Self {
        Self {
            name: name.into(),
            key_spec,
            default_language: None,
        }
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = Some(language.into());
        self
    }

    /// True for the store's implicit primary-key index
    pub fn is_primary_key(&self) -> bool {
        self.name == PRIMARY_KEY_INDEX
    }

    /// Renders the key spec as `{field: token, ...}` for operator output
    pub fn key_spec_display(&self) -> String {
        let fields: Vec<String> = self
            .key_spec
            .iter()
            .map(|(field, key_type)| format!("{field}: {key_type}"))
            .collect();
        format!("{{{}}}", fields.join(", "))
    }
}

/// Result of classifying one index descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Free-text search index; disallowed by policy and a remediation target
    DisallowedText,
    /// Any other index; left untouched
    Allowed,
}

impl Classification {
    pub fn is_disallowed(self) -> bool {
        matches!(self, Self::DisallowedText)
    }
}

/// Classifies a descriptor from its key spec alone.
///
/// A descriptor is disallowed iff any key resolves to the `text` token.
/// The index name and `default_language` carry no decision weight.
pub fn classify(descriptor: &IndexDescriptor) -> Classification {
    if descriptor
        .key_spec
        .iter()
        .any(|(_, key_type)| *key_type == IndexKeyType::Text)
    {
        Classification::DisallowedText
    } else {
        Classification::Allowed
    }
}
