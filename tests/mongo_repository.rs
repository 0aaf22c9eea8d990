//! `MongoRepository` against a real server.
//!
//! Needs Docker; run with `cargo test --test mongo_repository -- --ignored`.

use std::time::Duration;

use serde_json::{Map, Value, json};
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};

use travel_list::config::MongoStorageConfig;
use travel_list::domain::{Travel, TravelId};
use travel_list::error::StorageError;
use travel_list::storage::{MongoRepository, OpContext, TravelRepository};

const MONGO_PORT: u16 = 27017;

async fn start_mongo() -> (ContainerAsync<GenericImage>, MongoRepository) {
    let container = GenericImage::new("mongo", "7.0")
        .with_exposed_port(MONGO_PORT.tcp())
        .with_wait_for(WaitFor::message_on_stdout("Waiting for connections"))
        .start()
        .await
        .expect("Failed to start mongo container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(MONGO_PORT.tcp())
        .await
        .expect("Failed to get mapped port");

    let config = MongoStorageConfig {
        uri: format!("mongodb://{host}:{port}"),
        database: "travel-list-test".to_string(),
        collection: "travels".to_string(),
        connect_timeout: 20,
        app_name: Some("travel-list-tests".to_string()),
    };

    let repo = MongoRepository::connect(&config)
        .await
        .expect("Failed to connect");
    (container, repo)
}

fn ctx() -> OpContext {
    OpContext::with_timeout(Duration::from_secs(10))
}

fn travel(value: Value) -> Travel {
    let Value::Object(fields) = value else {
        panic!("travel payload must be an object");
    };
    Travel::from_fields(fields)
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_health_check() {
    let (_container, repo) = start_mongo().await;
    assert_eq!(
        repo.health_check().await.unwrap(),
        "connection to database established"
    );
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_crud_against_mongodb() {
    let (_container, repo) = start_mongo().await;

    assert!(repo.list_all(&ctx()).await.unwrap().is_empty());

    let input = travel(json!({
        "id": TravelId::generate().to_string(),
        "name": "Andes",
        "destination": "Lima",
        "tags": ["coast", "food"]
    }));
    let a = repo.insert_one(&ctx(), input.clone()).await.unwrap();
    let b = repo.insert_one(&ctx(), input.clone()).await.unwrap();
    assert_ne!(a, b);

    let loaded = repo.get_one(&ctx(), &a.to_string()).await.unwrap();
    assert_eq!(loaded.id, Some(a));
    assert_eq!(loaded.fields, input.fields);

    let replacement = travel(json!({"destination": "Quito"}));
    repo.replace_one(&ctx(), &b.to_string(), replacement.clone())
        .await
        .unwrap();
    let loaded = repo.get_one(&ctx(), &b.to_string()).await.unwrap();
    assert_eq!(loaded.id, Some(b));
    assert_eq!(loaded.fields, replacement.fields);

    assert_eq!(repo.list_all(&ctx()).await.unwrap().len(), 2);

    let absent = TravelId::generate().to_string();
    assert!(matches!(
        repo.get_one(&ctx(), &absent).await,
        Err(StorageError::NotFound(_))
    ));
    assert!(matches!(
        repo.replace_one(&ctx(), &absent, replacement).await,
        Err(StorageError::Unmatched(_))
    ));
    repo.delete_one(&ctx(), &absent).await.unwrap();

    repo.close().await;
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_lima_to_cusco_lifecycle() {
    let (_container, repo) = start_mongo().await;

    let a = repo
        .insert_one(&ctx(), travel(json!({"destination": "Lima"})))
        .await
        .unwrap()
        .to_string();

    let loaded = repo.get_one(&ctx(), &a).await.unwrap();
    assert_eq!(
        serde_json::to_value(&loaded).unwrap(),
        json!({"id": a, "destination": "Lima"})
    );

    repo.update_field(&ctx(), &a, "destination", json!("Cusco"))
        .await
        .unwrap();
    let loaded = repo.get_one(&ctx(), &a).await.unwrap();
    assert_eq!(
        serde_json::to_value(&loaded).unwrap(),
        json!({"id": a, "destination": "Cusco"})
    );

    repo.delete_one(&ctx(), &a).await.unwrap();
    assert!(matches!(
        repo.get_one(&ctx(), &a).await,
        Err(StorageError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_update_field_on_absent_id_is_not_an_error() {
    let (_container, repo) = start_mongo().await;
    let absent = TravelId::generate().to_string();
    repo.update_field(&ctx(), &absent, "destination", json!("Cusco"))
        .await
        .unwrap();
    assert!(repo.list_all(&ctx()).await.unwrap().is_empty());

    let empty = Travel::from_fields(Map::new());
    let id = repo.insert_one(&ctx(), empty).await.unwrap();
    let loaded = repo.get_one(&ctx(), &id.to_string()).await.unwrap();
    assert!(loaded.fields.is_empty());
}
