//! Router setup and configuration.

use axum::{Router, response::Redirect, routing::get};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, travels};
use crate::api::state::AppState;
use crate::config::WebConfig;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Health routes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready));

    // Travel CRUD routes
    let travel_routes = Router::new()
        .route("/", get(travels::list_travels).post(travels::create_travel))
        .route(
            "/{id}",
            get(travels::get_travel)
                .put(travels::replace_travel)
                .patch(travels::update_travel_field)
                .delete(travels::delete_travel),
        );

    let mut router = Router::new()
        .merge(health_routes)
        .nest("/api/travels", travel_routes);

    if state.config.web.enabled {
        router = mount_web_client(router, &state.config.web);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Serve the bundled web client under its mount path and redirect `/` to it.
///
/// Paths under the mount that match no file get the entry page, so client-side
/// routes survive a reload.
fn mount_web_client(router: Router<AppState>, web: &WebConfig) -> Router<AppState> {
    let static_dir = ServeDir::new(&web.dist_dir).fallback(ServeFile::new(web.index_path()));
    let mount_path = web.mount_path.clone();

    router
        .route("/", get(move || async move { Redirect::to(&mount_path) }))
        .nest_service(&web.mount_path, static_dir)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{AppConfig, StorageBackend};
    use crate::storage::MemoryRepository;

    fn app(web_enabled: bool) -> Router {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.web.enabled = web_enabled;
        let state = AppState::new(Arc::new(config), Arc::new(MemoryRepository::new()));
        create_router(state)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_id_envelope() {
        let response = app(false)
            .oneshot(Request::get("/api/travels/123").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"code": 3002, "message": "Invalid id: \"123\"", "data": null})
        );
    }

    #[tokio::test]
    async fn test_create_travel_route() {
        let response = app(false)
            .oneshot(
                Request::post("/api/travels")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"destination":"Lima"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["data"]["destination"], "Lima");
        assert_eq!(body["data"]["id"].as_str().map(str::len), Some(24));
    }

    #[tokio::test]
    async fn test_root_without_web_client() {
        let response = app(false)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_redirects_to_mount_path() {
        let response = app(true)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()["location"], "/web");
    }
}
