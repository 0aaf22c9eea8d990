//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, HealthResponse, ReadyResponse};
use crate::error::ErrorCode;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Readiness probe - pings the storage backend.
pub async fn ready(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ReadyResponse>>) {
    let backend = state.repository.backend_name().to_string();

    match state.repository.health_check().await {
        Ok(status) => (
            StatusCode::OK,
            Json(ApiResponse::success(ReadyResponse {
                ready: true,
                backend,
                storage: status,
            })),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            let response = ApiResponse {
                code: ErrorCode::SERVICE_UNAVAILABLE.as_i32(),
                message: "service unavailable".to_string(),
                data: Some(ReadyResponse {
                    ready: false,
                    backend,
                    storage: err.to_string(),
                }),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(response))
        }
    }
}
