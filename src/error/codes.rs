//! Error code constants.
//!
//! Error codes are organized by category:
//! - 3xxx: Validation errors
//! - 4xxx: Resource errors
//! - 5xxx: Internal/System errors

/// Error code type with semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Request succeeded.
    pub const SUCCESS: Self = Self(0);

    // ===== Validation Errors (3xxx) =====

    /// Bad request / invalid parameters.
    pub const BAD_REQUEST: Self = Self(3001);

    /// Identifier is not a valid storage identifier.
    pub const INVALID_ID: Self = Self(3002);

    /// Field cannot be modified.
    pub const IMMUTABLE_FIELD: Self = Self(3003);

    /// Field name cannot address a single top-level field.
    pub const INVALID_FIELD: Self = Self(3004);

    /// Value cannot be stored.
    pub const UNSUPPORTED_VALUE: Self = Self(3005);

    // ===== Resource Errors (4xxx) =====

    /// Travel not found.
    pub const NOT_FOUND: Self = Self(4001);

    // ===== Internal/System Errors (5xxx) =====

    /// Storage backend error.
    pub const STORAGE_ERROR: Self = Self(5001);

    /// Internal server error.
    pub const INTERNAL_ERROR: Self = Self(5002);

    /// Storage backend unreachable.
    pub const SERVICE_UNAVAILABLE: Self = Self(5003);

    /// Storage call exceeded its deadline.
    pub const STORAGE_TIMEOUT: Self = Self(5004);

    /// Get the error code as an i32.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
