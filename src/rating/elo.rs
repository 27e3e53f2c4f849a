//! Multi-player Elo rating engine
//!
//! Every participant is scored against every other participant in the match
//! as if they had played a two-player Elo game. Expected and actual scores are
//! averaged over all opponents and scaled by the game's K-factor.

use crate::types::{Participant, RatingResult};
use skillratings::elo::{expected_score as elo_expected_score, EloRating};
use std::cmp::Ordering;

/// Probability that a player rated `player_rating` beats one rated `opponent_rating`
///
/// Standard Elo logistic curve: equal ratings give exactly 0.5.
pub fn expected_score(player_rating: f64, opponent_rating: f64) -> f64 {
    let (expected, _) = elo_expected_score(
        &EloRating {
            rating: player_rating,
        },
        &EloRating {
            rating: opponent_rating,
        },
    );
    expected
}

/// Head-to-head score derived from finishing positions (lower is better)
pub fn actual_score(player_position: u32, opponent_position: u32) -> f64 {
    match player_position.cmp(&opponent_position) {
        Ordering::Less => 1.0,
        Ordering::Equal => 0.5,
        Ordering::Greater => 0.0,
    }
}

/// Round to the nearest integer, halves toward positive infinity
///
/// `-16.5` becomes `-16`, unlike `f64::round`.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Average (actual, expected) score of `participants[index]` against everyone else
///
/// Returns `None` when the participant has no opponents.
pub fn average_scores(participants: &[Participant], index: usize) -> Option<(f64, f64)> {
    let player = participants.get(index)?;
    let opponents = participants.len().checked_sub(1).filter(|n| *n > 0)?;

    let (actual_sum, expected_sum) = participants
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .fold((0.0, 0.0), |(actual, expected), (_, opponent)| {
            (
                actual + actual_score(player.position, opponent.position),
                expected + expected_score(player.current_rating, opponent.current_rating),
            )
        });

    Some((
        actual_sum / opponents as f64,
        expected_sum / opponents as f64,
    ))
}

/// Compute new ratings for every participant of a match
///
/// Results come back in input order. Input is expected to have passed result
/// validation; an empty slice yields an empty result and a lone participant
/// keeps their rating.
pub fn rate(participants: &[Participant], k_factor: f64) -> Vec<RatingResult> {
    participants
        .iter()
        .enumerate()
        .map(|(index, participant)| {
            let rating_change = match average_scores(participants, index) {
                Some((actual, expected)) => round_half_up(k_factor * (actual - expected)),
                None => 0.0,
            };
            // Rounded separately from the change so boundary cases match
            // the recorded history.
            let new_rating = round_half_up(participant.current_rating + rating_change).max(0.0);

            RatingResult {
                player_id: participant.player_id,
                previous_rating: participant.current_rating,
                new_rating: new_rating as i64,
                rating_change: rating_change as i64,
            }
        })
        .collect()
}
