//! Configuration management for RecipeDB
//!
//! This module provides a centralized configuration system that supports:
//! - YAML/TOML configuration files
//! - Environment variable overrides
//! - Reasonable defaults
//! - Configuration validation

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure for RecipeDB
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RecipeDbConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub query: QueryConfig,
}

impl RecipeDbConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file specified by RECIPEDB_CONFIG env var
    /// 3. ./config/recipedb.{yaml,toml}
    /// 4. /etc/recipedb/recipedb.{yaml,toml}
    /// 5. Hardcoded defaults (lowest priority)
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        builder = Self::set_defaults(builder)?;

        if let Ok(config_path) = std::env::var("RECIPEDB_CONFIG") {
            builder = builder.add_source(File::with_name(&config_path).required(false));
        }

        builder = builder
            .add_source(File::with_name("./config/recipedb").required(false))
            .add_source(File::with_name("/etc/recipedb/recipedb").required(false));

        // Example: RECIPEDB_API__BIND_ADDRESS=127.0.0.1:5000
        builder = builder.add_source(
            Environment::with_prefix("RECIPEDB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: RecipeDbConfig = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    fn set_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Store
            .set_default("store.backend", "file")?
            .set_default("store.path", "./data/recipes.json")?
            // API
            .set_default("api.bind_address", "0.0.0.0:5000")?
            .set_default("api.cors_max_age_secs", 3600)?
            // Query
            .set_default("query.default_page", 1)?
            .set_default("query.default_limit", 10)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.default_page == 0 {
            return Err(ConfigError::Message(
                "query.default_page must be > 0".to_string(),
            ));
        }

        if self.query.default_limit == 0 {
            return Err(ConfigError::Message(
                "query.default_limit must be > 0".to_string(),
            ));
        }

        if self.api.bind_address.trim().is_empty() {
            return Err(ConfigError::Message(
                "api.bind_address must not be empty".to_string(),
            ));
        }

        if self.store.backend == StoreBackend::File && self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "store.path is required for the file backend".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from a specific file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: RecipeDbConfig = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }
}

/// Which [`RecipeStore`](crate::traits::RecipeStore) implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store, lost on exit.
    Memory,
    /// JSON document file on local disk.
    #[default]
    File,
}

/// Recipe store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Location of the store document for the file backend
    pub path: PathBuf,

    /// Bulk payload loaded idempotently when the API boots
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            path: PathBuf::from("./data/recipes.json"),
            seed_file: None,
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Socket address the server binds to
    pub bind_address: String,

    /// How long browsers may cache CORS preflight responses
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            cors_max_age_secs: 3600,
        }
    }
}

impl ApiConfig {
    pub fn cors_max_age(&self) -> Duration {
        Duration::from_secs(self.cors_max_age_secs)
    }
}

/// Pagination defaults applied to list requests
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Page used when the request omits or garbles `page`
    pub default_page: u64,

    /// Page size used when the request omits or garbles `limit`
    pub default_limit: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_configuration() {
        let config = RecipeDbConfig::default();

        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.store.path, PathBuf::from("./data/recipes.json"));
        assert!(config.store.seed_file.is_none());

        assert_eq!(config.api.bind_address, "0.0.0.0:5000");
        assert_eq!(config.api.cors_max_age().as_secs(), 3600);

        assert_eq!(config.query.default_page, 1);
        assert_eq!(config.query.default_limit, 10);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = RecipeDbConfig::default();
        assert!(config.validate().is_ok());

        config.query.default_limit = 0;
        assert!(config.validate().is_err());
        config.query.default_limit = 10;

        config.query.default_page = 0;
        assert!(config.validate().is_err());
        config.query.default_page = 1;

        config.api.bind_address = "  ".to_string();
        assert!(config.validate().is_err());
    }

    /// Removes the named variables on drop so a failed assertion does not
    /// leak them into other tests.
    struct EnvGuard(&'static [&'static str]);

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in self.0 {
                std::env::remove_var(key);
            }
        }
    }

    // The only test that touches the process environment.
    #[test]
    fn test_load_layers_file_then_env() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
bind_address = "127.0.0.1:8080"

[query]
default_limit = 25
"#
        )
        .unwrap();

        let _guard = EnvGuard(&["RECIPEDB_CONFIG", "RECIPEDB_API__BIND_ADDRESS"]);
        std::env::set_var("RECIPEDB_CONFIG", file.path());
        std::env::set_var("RECIPEDB_API__BIND_ADDRESS", "127.0.0.1:9999");

        let config = RecipeDbConfig::load().unwrap();

        // Environment beats the file, the file beats the defaults
        assert_eq!(config.api.bind_address, "127.0.0.1:9999");
        assert_eq!(config.query.default_limit, 25);
        assert_eq!(config.query.default_page, 1);
        assert_eq!(config.store.backend, StoreBackend::File);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[store]
backend = "memory"
path = ""

[api]
bind_address = "127.0.0.1:8080"
cors_max_age_secs = 60

[query]
default_page = 1
default_limit = 25
"#
        )
        .unwrap();

        let config = RecipeDbConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.api.bind_address, "127.0.0.1:8080");
        assert_eq!(config.query.default_limit, 25);
    }
}
