//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::travel::check_field_name;
use crate::error::{AppError, ErrorCode};

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (0 = success, non-zero = error).
    pub code: i32,

    /// Human-readable message.
    pub message: String,

    /// Response data (null on error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response.
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::SUCCESS.as_i32(),
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response with no data.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            code: ErrorCode::SUCCESS.as_i32(),
            message: "success".to_string(),
            data: None,
        }
    }
}

/// Request to set a single field on a travel.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFieldRequest {
    /// Field name.
    pub field: String,

    /// New value; any JSON value, `null` included.
    #[serde(default)]
    pub value: Value,
}

impl UpdateFieldRequest {
    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a missing field name, or the storage
    /// error for a name no update may set.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.field.is_empty() {
            return Err(AppError::BadRequest("field is required".to_string()));
        }
        check_field_name(&self.field)?;
        Ok(())
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service version.
    pub version: String,
}

/// Readiness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Whether the storage backend answered its probe.
    pub ready: bool,

    /// Storage backend name.
    pub backend: String,

    /// Status reported by the storage backend.
    pub storage: String,
}
