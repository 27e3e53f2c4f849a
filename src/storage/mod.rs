//! Persistence for games, players, matches and ratings
//!
//! This module defines the repository interface the scoreboard is built on,
//! with in-memory and JSON file implementations.

pub mod json;
pub mod memory;
pub mod repository;

// Re-export commonly used types
pub use json::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use repository::Repository;

#[cfg(test)]
pub use repository::MockRepository;
