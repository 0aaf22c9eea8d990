//! Storage layer module.
//!
//! This module provides trait-based storage abstraction allowing different backends
//! to be used without changing the request handlers.

pub mod context;
pub mod factory;
pub mod memory;
pub mod mongo;
pub mod traits;

pub use context::OpContext;
pub use factory::create_repository;
pub use memory::MemoryRepository;
pub use mongo::MongoRepository;
pub use traits::TravelRepository;
