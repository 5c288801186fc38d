use crate::error::{Error, Result};
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the idxsweep tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

/// Configuration for the document store being audited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Provider type: "mongodb" or "mock"
    #[serde(default = "default_store_provider")]
    pub provider: String,

    /// Connection string for the store
    #[serde(default = "default_store_uri")]
    pub uri: String,

    /// Database whose collections are audited
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_store_provider() -> String {
    "mongodb".to_string()
}

fn default_store_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "app".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_store_provider(),
            uri: default_store_uri(),
            database: default_database(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `IDXSWEEP_` and use double underscores
    /// for nested values. For example:
    /// - `IDXSWEEP_STORE__URI=mongodb://db.internal:27017`
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with IDXSWEEP_ prefix
        builder = builder.add_source(
            Environment::with_prefix("IDXSWEEP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_providers = ["mongodb", "mock"];
        if !valid_providers.contains(&self.store.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid store provider '{}'. Must be one of: {}",
                self.store.provider,
                valid_providers.join(", ")
            )));
        }

        if self.store.uri.is_empty() {
            return Err(Error::config("Store URI must not be empty"));
        }

        if self.store.database.is_empty() {
            return Err(Error::config("Database name must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store.provider, "mongodb");
        assert_eq!(config.store.uri, "mongodb://localhost:27017");
        assert_eq!(config.store.database, "app");
        config.validate().expect("defaults should validate");
    }

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(
            r#"
            [store]
            provider = "mongodb"
            uri = "mongodb://db.internal:27017"
            database = "orders_db"
            "#,
        )
        .expect("valid TOML should parse");

        assert_eq!(config.store.uri, "mongodb://db.internal:27017");
        assert_eq!(config.store.database, "orders_db");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [store]
            database = "inventory"
            "#,
        )
        .expect("partial TOML should parse");

        assert_eq!(config.store.provider, "mongodb");
        assert_eq!(config.store.database, "inventory");
    }

    #[test]
    fn test_invalid_provider_rejected() {
        let config = Config::from_toml_str(
            r#"
            [store]
            provider = "dynamo"
            "#,
        )
        .expect("TOML should parse");

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_missing_path_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config =
            Config::from_file(&dir.path().join("absent.toml")).expect("missing file is not fatal");
        assert_eq!(config.store.provider, "mongodb");
    }
}
