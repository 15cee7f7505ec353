//! Game state persistence adapters.

pub mod json_repository;
pub mod memory_repository;

pub use json_repository::JsonStateRepository;
pub use memory_repository::InMemoryStateRepository;
