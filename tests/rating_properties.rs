//! Property tests for the rating engine and result validator

use proptest::prelude::*;
use scorekeeper::rating::elo::{average_scores, rate};
use scorekeeper::types::{Participant, PlayerResult};
use scorekeeper::validation::validate;
use scorekeeper::validation::validator::position_range_error;
use uuid::Uuid;

fn participants(entries: &[(u32, f64)]) -> Vec<Participant> {
    entries
        .iter()
        .map(|(position, rating)| Participant {
            player_id: Uuid::new_v4(),
            position: *position,
            current_rating: *rating,
        })
        .collect()
}

/// Positions for `n` players built from tie-group sizes, e.g. [2, 1] -> [1, 1, 3]
fn ranked_positions(groups: &[usize]) -> Vec<i64> {
    let mut positions = Vec::new();
    let mut next = 1;
    for &size in groups {
        positions.extend(std::iter::repeat(next).take(size));
        next += size as i64;
    }
    positions
}

proptest! {
    #[test]
    fn two_player_changes_are_symmetric(
        a in 0.0f64..4000.0,
        b in 0.0f64..4000.0,
        a_pos in 1u32..=2,
        b_pos in 1u32..=2,
        k in 0.0f64..100.0,
    ) {
        let results = rate(&participants(&[(a_pos, a), (b_pos, b)]), k);
        // Equal and opposite, except that a half-point change rounds up on both sides
        let total = results[0].rating_change + results[1].rating_change;
        prop_assert!((0..=1).contains(&total), "{:?}", results);
    }

    #[test]
    fn all_tied_changes_cancel_out(
        ratings in prop::collection::vec(0.0f64..4000.0, 2..8),
        k in 0.0f64..100.0,
    ) {
        let entries: Vec<(u32, f64)> = ratings.iter().map(|r| (1, *r)).collect();
        let results = rate(&participants(&entries), k);
        // Stronger players drift down, weaker ones up; only rounding breaks the balance
        let total: i64 = results.iter().map(|r| r.rating_change).sum();
        prop_assert!(total.unsigned_abs() as usize <= results.len());
    }

    #[test]
    fn all_tied_equal_ratings_never_move(
        rating in 0.0f64..4000.0,
        n in 2usize..8,
        k in 0.0f64..100.0,
    ) {
        let entries: Vec<(u32, f64)> = (0..n).map(|_| (1, rating)).collect();
        for result in rate(&participants(&entries), k) {
            prop_assert_eq!(result.rating_change, 0);
        }
    }

    #[test]
    fn equal_ratings_are_zero_sum_before_rounding(
        groups in prop::collection::vec(1usize..3, 2..6),
        rating in 0.0f64..4000.0,
    ) {
        let entries: Vec<(u32, f64)> = ranked_positions(&groups)
            .into_iter()
            .map(|p| (p as u32, rating))
            .collect();
        let players = participants(&entries);

        let total: f64 = (0..players.len())
            .map(|i| {
                let (actual, expected) = average_scores(&players, i).unwrap();
                actual - expected
            })
            .sum();
        prop_assert!(total.abs() < 1e-9);
    }

    #[test]
    fn new_rating_is_never_negative(
        entries in prop::collection::vec((1u32..5, -5000.0f64..5000.0), 1..8),
        k in 0.0f64..200.0,
    ) {
        for result in rate(&participants(&entries), k) {
            prop_assert!(result.new_rating >= 0);
        }
    }

    #[test]
    fn one_result_per_participant_in_order(
        entries in prop::collection::vec((1u32..5, 0.0f64..4000.0), 0..8),
        k in 0.0f64..100.0,
    ) {
        let players = participants(&entries);
        let results = rate(&players, k);
        prop_assert_eq!(results.len(), players.len());
        for (player, result) in players.iter().zip(&results) {
            prop_assert_eq!(player.player_id, result.player_id);
            prop_assert_eq!(player.current_rating, result.previous_rating);
        }
    }

    #[test]
    fn winner_never_loses_rating(
        ratings in prop::collection::vec(0.0f64..4000.0, 2..8),
        k in 0.0f64..100.0,
    ) {
        // Sole first place beats everyone, so actual >= expected
        let entries: Vec<(u32, f64)> = ratings
            .iter()
            .enumerate()
            .map(|(i, r)| (i as u32 + 1, *r))
            .collect();
        let results = rate(&participants(&entries), k);
        prop_assert!(results[0].rating_change >= 0);
        prop_assert!(results[results.len() - 1].rating_change <= 0);
    }

    #[test]
    fn tie_aware_rankings_validate(groups in prop::collection::vec(1usize..4, 1..6)) {
        let positions = ranked_positions(&groups);
        let results: Vec<PlayerResult> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| PlayerResult::new(format!("player{}", i), *p))
            .collect();

        let outcome = validate(&results);
        prop_assert_eq!(outcome.is_valid, results.len() >= 2, "{:?}", outcome.errors);
    }

    #[test]
    fn arbitrary_rankings_report_consistent_errors(
        entries in prop::collection::vec((any::<String>(), any::<i64>()), 0..8),
    ) {
        let results: Vec<PlayerResult> = entries
            .iter()
            .map(|(name, position)| PlayerResult::new(name.clone(), *position))
            .collect();
        let n = results.len();

        let outcome = validate(&results);
        prop_assert_eq!(outcome.is_valid, outcome.errors.is_empty());
        if results.iter().any(|r| r.position < 1 || r.position > n as i64) {
            prop_assert!(!outcome.is_valid);
            prop_assert!(outcome.errors.contains(&position_range_error(n)), "{:?}", outcome.errors);
        }
    }

    #[test]
    fn extreme_positions_are_rejected(
        positions in prop::collection::vec(
            prop_oneof![Just(i64::MAX), Just(i64::MIN), Just(i64::MAX - 1), any::<i64>()],
            2..6,
        ),
    ) {
        let results: Vec<PlayerResult> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| PlayerResult::new(format!("player{}", i), *p))
            .collect();

        let outcome = validate(&results);
        prop_assert!(!outcome.is_valid);
        prop_assert!(outcome.errors.contains(&position_range_error(results.len())));
    }

    #[test]
    fn engine_is_deterministic(
        entries in prop::collection::vec((1u32..5, 0.0f64..4000.0), 1..6),
        k in 0.0f64..100.0,
    ) {
        let players = participants(&entries);
        prop_assert_eq!(rate(&players, k), rate(&players, k));
    }
}
