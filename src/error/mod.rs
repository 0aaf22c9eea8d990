//! Error handling module.
//!
//! `StorageError` is what the repository layer returns; `AppError` wraps it for
//! the HTTP layer and renders the standard API envelope.

pub mod codes;

use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::ErrorCode;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Storage layer error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST,
            Self::Storage(err) => err.error_code(),
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(err) => err.status_code(),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().as_i32();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code = code,
                status = %status,
                message = %message,
                "Request failed"
            );
        } else {
            tracing::debug!(
                error_code = code,
                status = %status,
                message = %message,
                "Request rejected"
            );
        }

        let body = Json(json!({
            "code": code,
            "message": message,
            "data": null
        }));

        (status, body).into_response()
    }
}

/// Storage-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Backend unreachable or the liveness probe failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Identifier could not be parsed into the storage identifier format.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// Well-formed identifier with no matching record.
    #[error("Travel not found: {0}")]
    NotFound(String),

    /// Replacement target does not exist.
    #[error("No travel matched id {0}")]
    Unmatched(String),

    /// Attempt to overwrite the record identifier.
    #[error("Field {0:?} cannot be modified")]
    ImmutableField(String),

    /// Field name is empty, a dotted path, or starts with `$`.
    #[error("Invalid field name: {0:?}")]
    InvalidField(String),

    /// Value has no representation in the stored document format.
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Query or write failed in the backend.
    #[error("Query failed: {0}")]
    Query(String),

    /// Document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Operation did not finish before its deadline.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// Storage operation name.
        operation: &'static str,
        /// Budget the operation was given.
        after: Duration,
    },
}

impl StorageError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Connection(_) => ErrorCode::SERVICE_UNAVAILABLE,
            Self::InvalidId(_) => ErrorCode::INVALID_ID,
            Self::ImmutableField(_) => ErrorCode::IMMUTABLE_FIELD,
            Self::InvalidField(_) => ErrorCode::INVALID_FIELD,
            Self::UnsupportedValue(_) => ErrorCode::UNSUPPORTED_VALUE,
            Self::NotFound(_) | Self::Unmatched(_) => ErrorCode::NOT_FOUND,
            Self::Query(_) | Self::Serialization(_) => ErrorCode::STORAGE_ERROR,
            Self::Timeout { .. } => ErrorCode::STORAGE_TIMEOUT,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidId(_)
            | Self::ImmutableField(_)
            | Self::InvalidField(_)
            | Self::UnsupportedValue(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Unmatched(_) => StatusCode::NOT_FOUND,
            Self::Query(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<mongodb::error::Error> for StorageError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Query(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StorageError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `StorageError`.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
