//! Rating system built on multi-player Elo
//!
//! This module provides the rating engine and the calculator interface the
//! scoreboard service depends on.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::{EloRatingCalculator, RatingCalculator};
pub use elo::{actual_score, expected_score, rate};
