//! Rating calculator trait and implementations
//!
//! This module defines the interface the scoreboard uses to turn match
//! placements into rating updates, plus the Elo implementation.

use crate::rating::elo;
use crate::types::{Participant, RatingResult};

/// Trait for calculating rating changes after a match
pub trait RatingCalculator: Send + Sync {
    /// Calculate new ratings for every participant
    ///
    /// # Arguments
    /// * `participants` - Every player of the match with position and current rating
    /// * `k_factor` - Per-game scale for the size of rating changes
    ///
    /// # Returns
    /// One result per participant, in input order
    fn calculate_rating_changes(
        &self,
        participants: &[Participant],
        k_factor: f64,
    ) -> Vec<RatingResult>;

    /// Short name of the rating system, for logging
    fn name(&self) -> &'static str;
}

/// Round-robin multi-player Elo
#[derive(Debug, Clone, Copy, Default)]
pub struct EloRatingCalculator;

impl EloRatingCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate_rating_changes(
        &self,
        participants: &[Participant],
        k_factor: f64,
    ) -> Vec<RatingResult> {
        elo::rate(participants, k_factor)
    }

    fn name(&self) -> &'static str {
        "elo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_elo_calculator_delegates_to_engine() {
        let calculator = EloRatingCalculator::new();
        let participants = vec![
            Participant {
                player_id: Uuid::new_v4(),
                position: 2,
                current_rating: 1500.0,
            },
            Participant {
                player_id: Uuid::new_v4(),
                position: 1,
                current_rating: 1500.0,
            },
        ];

        let results = calculator.calculate_rating_changes(&participants, 32.0);
        assert_eq!(results, elo::rate(&participants, 32.0));
        assert_eq!(results[0].rating_change, -16);
        assert_eq!(results[1].rating_change, 16);
        assert_eq!(calculator.name(), "elo");
    }

    #[test]
    fn test_calculator_is_stateless_between_calls() {
        let calculator = EloRatingCalculator::new();
        let participants = vec![
            Participant {
                player_id: Uuid::new_v4(),
                position: 1,
                current_rating: 1620.0,
            },
            Participant {
                player_id: Uuid::new_v4(),
                position: 2,
                current_rating: 1480.0,
            },
        ];

        let first = calculator.calculate_rating_changes(&participants, 24.0);
        let second = calculator.calculate_rating_changes(&participants, 24.0);
        assert_eq!(first, second);
    }
}
