//! In-memory storage backend.
//!
//! Keeps the collection in insertion order, which is what a full scan
//! returns. Nothing is persisted. Suitable for development and tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{Travel, TravelId, Travels, check_field_name, check_value};
use crate::error::{StorageError, StorageResult};
use crate::storage::context::OpContext;
use crate::storage::traits::TravelRepository;

/// In-memory travel repository.
#[derive(Default)]
pub struct MemoryRepository {
    travels: RwLock<Vec<(TravelId, Map<String, Value>)>>,
    closed: AtomicBool,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored travels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.travels.read().len()
    }

    /// Whether the repository holds no travels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.travels.read().is_empty()
    }
}

#[async_trait]
impl TravelRepository for MemoryRepository {
    async fn health_check(&self) -> StorageResult<String> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Connection("repository closed".to_string()));
        }
        Ok("in-memory store available".to_string())
    }

    async fn list_all(&self, ctx: &OpContext) -> StorageResult<Travels> {
        ctx.run("list_all", async {
            Ok(self
                .travels
                .read()
                .iter()
                .map(|(id, fields)| Travel::from_fields(fields.clone()).with_id(*id))
                .collect())
        })
        .await
    }

    async fn get_one(&self, ctx: &OpContext, id: &str) -> StorageResult<Travel> {
        let travel_id = TravelId::parse(id)?;
        ctx.run("get_one", async {
            self.travels
                .read()
                .iter()
                .find(|(stored, _)| *stored == travel_id)
                .map(|(_, fields)| Travel::from_fields(fields.clone()).with_id(travel_id))
                .ok_or_else(|| StorageError::NotFound(id.to_string()))
        })
        .await
    }

    async fn insert_one(&self, ctx: &OpContext, travel: Travel) -> StorageResult<TravelId> {
        let travel_id = TravelId::generate();
        let Travel { fields, .. } = Travel::from_fields(travel.fields);
        fields.values().try_for_each(check_value)?;
        ctx.run("insert_one", async {
            self.travels.write().push((travel_id, fields));
            debug!(id = %travel_id, "Travel inserted");
            Ok(travel_id)
        })
        .await
    }

    async fn replace_one(&self, ctx: &OpContext, id: &str, travel: Travel) -> StorageResult<()> {
        let travel_id = TravelId::parse(id)?;
        let Travel { fields, .. } = Travel::from_fields(travel.fields);
        fields.values().try_for_each(check_value)?;
        ctx.run("replace_one", async {
            let mut travels = self.travels.write();
            let (_, slot) = travels
                .iter_mut()
                .find(|(stored, _)| *stored == travel_id)
                .ok_or_else(|| StorageError::Unmatched(id.to_string()))?;
            *slot = fields;
            Ok(())
        })
        .await
    }

    async fn update_field(
        &self,
        ctx: &OpContext,
        id: &str,
        field: &str,
        value: Value,
    ) -> StorageResult<()> {
        let travel_id = TravelId::parse(id)?;
        check_field_name(field)?;
        check_value(&value)?;
        ctx.run("update_field", async {
            // Mirrors a `$set` on an unmatched filter: no-op, no error.
            let mut travels = self.travels.write();
            let target = travels.iter_mut().find(|(stored, _)| *stored == travel_id);
            if let Some((_, fields)) = target {
                fields.insert(field.to_string(), value);
            }
            Ok(())
        })
        .await
    }

    async fn delete_one(&self, ctx: &OpContext, id: &str) -> StorageResult<()> {
        let travel_id = TravelId::parse(id)?;
        ctx.run("delete_one", async {
            self.travels.write().retain(|(stored, _)| *stored != travel_id);
            Ok(())
        })
        .await
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        debug!("In-memory repository closed");
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
