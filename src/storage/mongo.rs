//! `MongoDB` storage backend.
//!
//! One `Client` is created at startup and shared by every request; the driver
//! multiplexes calls over its own connection pool. Each call is bounded by the
//! caller's `OpContext`.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::MongoStorageConfig;
use crate::domain::travel::STORAGE_ID_FIELD;
use crate::domain::{Travel, TravelId, Travels, check_field_name, check_value};
use crate::error::{StorageError, StorageResult};
use crate::storage::context::OpContext;
use crate::storage::traits::TravelRepository;

/// Travel repository backed by a `MongoDB` collection.
pub struct MongoRepository {
    client: Client,
    database: String,
    collection: Collection<Document>,
}

impl MongoRepository {
    /// Connect, verify liveness and select the configured collection.
    ///
    /// The whole handshake, ping included, is bounded by
    /// `config.connect_timeout`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the URI is invalid, the server is
    /// unreachable, or the ping fails within the bound.
    pub async fn connect(config: &MongoStorageConfig) -> StorageResult<Self> {
        let bound = config.connect_timeout();

        let mut options = ClientOptions::parse(config.uri.as_str())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        options.connect_timeout = Some(bound);
        options.server_selection_timeout = Some(bound);
        if let Some(app_name) = &config.app_name {
            options.app_name = Some(app_name.clone());
        }

        let client =
            Client::with_options(options).map_err(|e| StorageError::Connection(e.to_string()))?;
        info!("Database client created");

        let repo = Self::from_client(client, &config.database, &config.collection);

        let status = tokio::time::timeout(bound, repo.health_check())
            .await
            .map_err(|_| {
                StorageError::Connection(format!("no ping response within {bound:?}"))
            })??;
        info!(
            database = %config.database,
            collection = %config.collection,
            status = %status,
            "Database client connected"
        );

        Ok(repo)
    }

    /// Wrap an existing client. No connection is attempted.
    #[must_use]
    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Document>(collection);
        Self {
            client,
            database: database.to_string(),
            collection,
        }
    }

}

/// Filter matching a single travel by id.
fn id_filter(id: TravelId) -> Document {
    doc! { "_id": id.as_object_id() }
}

/// Encode a travel's domain fields as a stored document under `id`.
///
/// Any identifier keys in `fields` are dropped; `_id` always comes from `id`.
pub(crate) fn travel_to_document(
    id: TravelId,
    fields: Map<String, Value>,
) -> StorageResult<Document> {
    let Travel { fields, .. } = Travel::from_fields(fields);
    let mut document = Document::new();
    document.insert(STORAGE_ID_FIELD, id.as_object_id());
    for (key, value) in fields {
        check_value(&value)?;
        document.insert(key, bson::to_bson(&value)?);
    }
    Ok(document)
}

/// Decode a stored document into a travel.
pub(crate) fn document_to_travel(mut document: Document) -> StorageResult<Travel> {
    let id = match document.remove(STORAGE_ID_FIELD) {
        Some(Bson::ObjectId(oid)) => TravelId::from(oid),
        Some(other) => {
            return Err(StorageError::Serialization(format!(
                "expected ObjectId in {STORAGE_ID_FIELD}, found {:?}",
                other.element_type()
            )));
        }
        None => {
            return Err(StorageError::Serialization(format!(
                "document has no {STORAGE_ID_FIELD}"
            )));
        }
    };

    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => Ok(Travel::from_fields(fields).with_id(id)),
        other => Err(StorageError::Serialization(format!(
            "document decoded to non-object {other}"
        ))),
    }
}

#[async_trait]
impl TravelRepository for MongoRepository {
    async fn health_check(&self) -> StorageResult<String> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok("connection to database established".to_string())
    }

    async fn list_all(&self, ctx: &OpContext) -> StorageResult<Travels> {
        ctx.run("list_all", async {
            let cursor = self.collection.find(doc! {}).await?;
            let documents: Vec<Document> = cursor.try_collect().await?;
            documents
                .into_iter()
                .map(document_to_travel)
                .collect::<StorageResult<Travels>>()
        })
        .await
    }

    async fn get_one(&self, ctx: &OpContext, id: &str) -> StorageResult<Travel> {
        let travel_id = TravelId::parse(id)?;
        ctx.run("get_one", async {
            let document = self
                .collection
                .find_one(id_filter(travel_id))
                .await?
                .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
            document_to_travel(document)
        })
        .await
    }

    async fn insert_one(&self, ctx: &OpContext, travel: Travel) -> StorageResult<TravelId> {
        let travel_id = TravelId::generate();
        let document = travel_to_document(travel_id, travel.fields)?;
        ctx.run("insert_one", async {
            self.collection.insert_one(document).await?;
            debug!(id = %travel_id, "Travel inserted");
            Ok(travel_id)
        })
        .await
    }

    async fn replace_one(&self, ctx: &OpContext, id: &str, travel: Travel) -> StorageResult<()> {
        let travel_id = TravelId::parse(id)?;
        let replacement = travel_to_document(travel_id, travel.fields)?;
        ctx.run("replace_one", async {
            let result = self
                .collection
                .replace_one(id_filter(travel_id), replacement)
                .await?;
            if result.matched_count == 0 {
                return Err(StorageError::Unmatched(id.to_string()));
            }
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
        let value = bson::to_bson(&value)?;
        ctx.run("update_field", async {
            let mut set = Document::new();
            set.insert(field, value);
            self.collection
                .update_one(id_filter(travel_id), doc! { "$set": set })
                .await?;
            Ok(())
        })
        .await
    }

    async fn delete_one(&self, ctx: &OpContext, id: &str) -> StorageResult<()> {
        let travel_id = TravelId::parse(id)?;
        ctx.run("delete_one", async {
            self.collection.delete_one(id_filter(travel_id)).await?;
            Ok(())
        })
        .await
    }

    async fn close(&self) {
        let bound = std::time::Duration::from_secs(5);
        if tokio::time::timeout(bound, self.client.clone().shutdown())
            .await
            .is_err()
        {
            warn!(?bound, "Database client did not shut down in time");
            return;
        }
        info!("Database client disconnected");
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}
