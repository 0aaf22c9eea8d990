//! Service layer.
//!
//! Sits between the HTTP handlers and the storage layer.

pub mod travel;

pub use travel::TravelService;
