//! Storage trait definitions.
//!
//! `TravelRepository` is the contract every backend implements; handlers only
//! ever see it as `Arc<dyn TravelRepository>`.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Travel, TravelId, Travels};
use crate::error::StorageResult;
use crate::storage::context::OpContext;

/// Data access for the travel collection.
///
/// Every `id` argument is the caller-supplied string; implementations parse it
/// into a `TravelId` before touching the backend and fail with
/// `StorageError::InvalidId` when it is malformed.
#[async_trait]
pub trait TravelRepository: Send + Sync {
    /// Probe the backend.
    ///
    /// Returns a human-readable status on success and
    /// `StorageError::Connection` otherwise.
    async fn health_check(&self) -> StorageResult<String>;

    /// Every record in the collection, in storage iteration order.
    ///
    /// An empty collection yields an empty vector.
    async fn list_all(&self, ctx: &OpContext) -> StorageResult<Travels>;

    /// The record with the given id, or `StorageError::NotFound`.
    async fn get_one(&self, ctx: &OpContext, id: &str) -> StorageResult<Travel>;

    /// Persist `travel` under a freshly generated id.
    ///
    /// Any id already on `travel` is overwritten. Returns the assigned id.
    async fn insert_one(&self, ctx: &OpContext, travel: Travel) -> StorageResult<TravelId>;

    /// Replace the full content of an existing record, keeping its id.
    ///
    /// Fails with `StorageError::Unmatched` if no record has that id.
    async fn replace_one(&self, ctx: &OpContext, id: &str, travel: Travel) -> StorageResult<()>;

    /// Set a single field on a record.
    ///
    /// The identifier field cannot be targeted.
    async fn update_field(
        &self,
        ctx: &OpContext,
        id: &str,
        field: &str,
        value: Value,
    ) -> StorageResult<()>;

    /// Remove a record. Removing an absent id is not an error.
    async fn delete_one(&self, ctx: &OpContext, id: &str) -> StorageResult<()>;

    /// Release backend resources. Failures are logged, not returned.
    async fn close(&self);

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}
