//! Travel service.
//!
//! Gives every repository call its own deadline and turns the results into
//! what the handlers send back.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::info;

use crate::domain::{Travel, Travels};
use crate::error::Result;
use crate::storage::{OpContext, TravelRepository};

/// Service for travel CRUD operations.
pub struct TravelService {
    /// Storage backend.
    repository: Arc<dyn TravelRepository>,
    /// Deadline applied to each repository call.
    operation_timeout: Duration,
}

impl TravelService {
    /// Create a new travel service.
    pub fn new(repository: Arc<dyn TravelRepository>, operation_timeout: Duration) -> Self {
        Self {
            repository,
            operation_timeout,
        }
    }

    fn context(&self) -> OpContext {
        OpContext::with_timeout(self.operation_timeout)
    }

    /// List every travel.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage call fails or times out.
    pub async fn list(&self) -> Result<Travels> {
        Ok(self.repository.list_all(&self.context()).await?)
    }

    /// Get one travel by id.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed, no travel has it, or storage fails.
    pub async fn get(&self, id: &str) -> Result<Travel> {
        Ok(self.repository.get_one(&self.context(), id).await?)
    }

    /// Create a travel from a client payload and return it with its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn create(&self, payload: Map<String, Value>) -> Result<Travel> {
        let travel = Travel::from_fields(payload);
        let id = self
            .repository
            .insert_one(&self.context(), travel.clone())
            .await?;
        info!(%id, "Travel created");
        Ok(travel.with_id(id))
    }

    /// Replace a travel's content and return what was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed, matches nothing, or storage fails.
    pub async fn replace(&self, id: &str, payload: Map<String, Value>) -> Result<Travel> {
        let travel = Travel::from_fields(payload);
        self.repository
            .replace_one(&self.context(), id, travel.clone())
            .await?;
        Ok(Travel {
            id: Some(id.parse()?),
            ..travel
        })
    }

    /// Set a single field on a travel.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed, `field` is the identifier, or storage fails.
    pub async fn update_field(&self, id: &str, field: &str, value: Value) -> Result<()> {
        Ok(self
            .repository
            .update_field(&self.context(), id, field, value)
            .await?)
    }

    /// Delete a travel.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is malformed or storage fails.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repository.delete_one(&self.context(), id).await?;
        info!(%id, "Travel deleted");
        Ok(())
    }
}
