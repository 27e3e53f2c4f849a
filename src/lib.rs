//! Scorekeeper - game results and per-game Elo leaderboards
//!
//! This crate provides a multi-player Elo rating engine, validation of
//! submitted rankings, and a scoreboard service persisting games, players,
//! matches and ratings through a pluggable repository.

pub mod config;
pub mod error;
pub mod rating;
pub mod service;
pub mod storage;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used types and traits
pub use error::{Result, ScorekeeperError};
pub use types::*;

// Re-export key components
pub use rating::{EloRatingCalculator, RatingCalculator};
pub use service::Scoreboard;
pub use storage::{InMemoryRepository, JsonFileRepository, Repository};
pub use validation::{validate, ValidationOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
