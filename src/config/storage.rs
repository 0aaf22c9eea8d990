//! Storage configuration.

use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;

/// Storage backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `MongoDB` collection.
    #[default]
    #[serde(rename = "mongodb")]
    MongoDb,
    /// In-process map (development/tests, nothing persisted).
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MongoDb => write!(f, "mongodb"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Deadline for a single storage call, in seconds.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout: u64,

    /// `MongoDB` configuration.
    #[serde(default)]
    pub mongodb: MongoStorageConfig,
}

const fn default_operation_timeout() -> u64 {
    10
}

impl StorageConfig {
    /// Per-call deadline as a `Duration`.
    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout)
    }

    /// Validate the storage configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration fields are missing for the selected backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.operation_timeout == 0 {
            return Err(ConfigError::Message(
                "storage.operation_timeout cannot be 0".to_string(),
            ));
        }

        match self.backend {
            StorageBackend::Memory => Ok(()),
            StorageBackend::MongoDb => self.mongodb.validate(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::MongoDb,
            operation_timeout: default_operation_timeout(),
            mongodb: MongoStorageConfig::default(),
        }
    }
}

/// `MongoDB` configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoStorageConfig {
    /// Connection URI.
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database name.
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection holding the travels.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Bound on connecting and the startup ping, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Application name reported to the server.
    #[serde(default)]
    pub app_name: Option<String>,
}

fn default_uri() -> String {
    "mongodb://127.0.0.1:27017".to_string()
}

fn default_database() -> String {
    "travel-list".to_string()
}

fn default_collection() -> String {
    "travels".to_string()
}

const fn default_connect_timeout() -> u64 {
    20
}

impl MongoStorageConfig {
    /// Connect/handshake bound as a `Duration`.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("storage.mongodb.uri", &self.uri),
            ("storage.mongodb.database", &self.database),
            ("storage.mongodb.collection", &self.collection),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Message(format!("{key} cannot be empty")));
            }
        }
        if self.connect_timeout == 0 {
            return Err(ConfigError::Message(
                "storage.mongodb.connect_timeout cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MongoStorageConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            collection: default_collection(),
            connect_timeout: default_connect_timeout(),
            app_name: None,
        }
    }
}
