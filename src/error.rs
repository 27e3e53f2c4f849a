//! Error types for the scorekeeper
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific scorekeeping scenarios
#[derive(Debug, thiserror::Error)]
pub enum ScorekeeperError {
    #[error("Invalid match result: {}", .errors.join("; "))]
    InvalidMatchResult { errors: Vec<String> },

    #[error("Game not found: {game}")]
    GameNotFound { game: String },

    #[error("Game already exists: {name}")]
    DuplicateGame { name: String },

    #[error("Invalid game: {reason}")]
    InvalidGame { reason: String },

    #[error("Player not found: {player}")]
    PlayerNotFound { player: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
