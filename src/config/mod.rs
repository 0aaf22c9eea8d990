//! Configuration management module.
//!
//! Supports loading configuration from:
//! - A `.env` file (exported into the process environment first)
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `TRAVEL_LIST__<SECTION>__<KEY>` pattern

mod server;
mod storage;

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use server::ServerConfig;
pub use storage::{MongoStorageConfig, StorageBackend, StorageConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Bundled web client configuration.
    #[serde(default)]
    pub web: WebConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{TRAVEL_LIST_PROFILE}.toml` (if `TRAVEL_LIST_PROFILE` is set)
    /// 3. Environment variables with `TRAVEL_LIST__` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let profile =
            std::env::var("TRAVEL_LIST_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // TRAVEL_LIST__STORAGE__MONGODB__URI=... -> storage.mongodb.uri
            .add_source(
                Environment::with_prefix("TRAVEL_LIST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        self.storage.validate()?;
        self.web.validate()?;

        Ok(())
    }
}

/// Bundled web client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Serve the web client at all.
    #[serde(default = "default_web_enabled")]
    pub enabled: bool,

    /// URL prefix the client is mounted under; `/` redirects here.
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    /// Directory holding the built client.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Entry page served for unknown client routes.
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

const fn default_web_enabled() -> bool {
    true
}

fn default_mount_path() -> String {
    "/web".to_string()
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("web/dist/web")
}

fn default_index_file() -> String {
    "index.html".to_string()
}

impl WebConfig {
    /// Full path of the entry page.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.dist_dir.join(&self.index_file)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        if !self.mount_path.starts_with('/') || self.mount_path.len() < 2 {
            return Err(ConfigError::Message(
                "web.mount_path must start with '/' and cannot be the root".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: default_web_enabled(),
            mount_path: default_mount_path(),
            dist_dir: default_dist_dir(),
            index_file: default_index_file(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}
