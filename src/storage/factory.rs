//! Storage backend factory.
//!
//! Creates the appropriate repository based on configuration.

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::StorageResult;
use crate::storage::memory::MemoryRepository;
use crate::storage::mongo::MongoRepository;
use crate::storage::traits::TravelRepository;

/// Create a travel repository based on configuration.
///
/// # Errors
///
/// Returns `StorageError::Connection` if the backend cannot be reached or
/// fails its startup health check.
pub async fn create_repository(
    config: &StorageConfig,
) -> StorageResult<Arc<dyn TravelRepository>> {
    let repository: Arc<dyn TravelRepository> = match config.backend {
        StorageBackend::MongoDb => Arc::new(MongoRepository::connect(&config.mongodb).await?),
        StorageBackend::Memory => Arc::new(MemoryRepository::new()),
    };

    let status = repository.health_check().await?;
    info!(backend = repository.backend_name(), %status, "Storage ready");

    Ok(repository)
}
