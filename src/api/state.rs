//! Application state for Axum handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::service::TravelService;
use crate::storage::TravelRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Storage backend.
    pub repository: Arc<dyn TravelRepository>,
    /// Travel service.
    pub travel_service: Arc<TravelService>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<AppConfig>, repository: Arc<dyn TravelRepository>) -> Self {
        let travel_service = Arc::new(TravelService::new(
            Arc::clone(&repository),
            config.storage.operation_timeout(),
        ));

        Self {
            config,
            repository,
            travel_service,
        }
    }
}
