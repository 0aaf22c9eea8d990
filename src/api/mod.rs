//! API layer module.
//!
//! HTTP handlers and routing for the travel service.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
