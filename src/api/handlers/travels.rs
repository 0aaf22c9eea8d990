//! Travel CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Map, Value};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, Travel, Travels, UpdateFieldRequest};
use crate::error::Result;

/// List all travels.
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn list_travels(State(state): State<AppState>) -> Result<Json<ApiResponse<Travels>>> {
    let travels = state.travel_service.list().await?;
    Ok(Json(ApiResponse::success(travels)))
}

/// Get a travel by id.
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 if no travel has it.
pub async fn get_travel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Travel>>> {
    let travel = state.travel_service.get(&id).await?;
    Ok(Json(ApiResponse::success(travel)))
}

/// Create a travel. Any `id` in the body is ignored.
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn create_travel(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<ApiResponse<Travel>>)> {
    let travel = state.travel_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(travel))))
}

/// Replace a travel's content. The body must carry the full record.
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 if no travel has it.
pub async fn replace_travel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<ApiResponse<Travel>>> {
    let travel = state.travel_service.replace(&id, payload).await?;
    Ok(Json(ApiResponse::success(travel)))
}

/// Set a single field on a travel.
///
/// # Errors
///
/// Returns 400 for a malformed id or an invalid field name.
pub async fn update_travel_field(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateFieldRequest>,
) -> Result<Json<ApiResponse<()>>> {
    request.validate()?;

    state
        .travel_service
        .update_field(&id, &request.field, request.value)
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// Delete a travel. Deleting an unknown id succeeds.
///
/// # Errors
///
/// Returns 400 for a malformed id.
pub async fn delete_travel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.travel_service.delete(&id).await?;
    Ok(Json(ApiResponse::ok()))
}
