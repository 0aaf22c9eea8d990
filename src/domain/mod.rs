//! Domain models.
//!
//! The travel record, its identifier, and the API contracts around them.

pub mod dto;
pub mod travel;

pub use dto::{ApiResponse, HealthResponse, ReadyResponse, UpdateFieldRequest};
pub use travel::{Travel, TravelId, Travels, check_field_name, check_value};
