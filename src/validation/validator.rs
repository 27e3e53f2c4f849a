//! Match result validation
//!
//! Every check runs independently so callers can show the full list of
//! problems with a submitted ranking at once.

use crate::types::PlayerResult;
use crate::utils::normalize_name;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Minimum number of players in a rated match
pub const MIN_PLAYERS: usize = 2;

pub const ERR_TOO_FEW_PLAYERS: &str = "At least 2 players are required";
pub const ERR_DUPLICATE_NAMES: &str = "Player names must be unique";
pub const ERR_EMPTY_NAME: &str = "Player names cannot be empty";
pub const ERR_NOT_STARTING_AT_ONE: &str = "Positions must start from 1";
pub const ERR_NON_CONTIGUOUS: &str =
    "Positions must be contiguous (tied players share a position and the next position skips accordingly)";

/// Outcome of validating a submitted ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Range error message for a match with `player_count` entries
pub fn position_range_error(player_count: usize) -> String {
    format!("Positions must be between 1 and {}", player_count)
}

/// Validate a submitted ranking before it reaches the rating engine
pub fn validate(results: &[PlayerResult]) -> ValidationOutcome {
    let mut errors = Vec::new();
    let player_count = results.len();

    if player_count < MIN_PLAYERS {
        errors.push(ERR_TOO_FEW_PLAYERS.to_string());
    }

    let mut seen = HashSet::new();
    let has_duplicates = results
        .iter()
        .map(|r| normalize_name(&r.player_name))
        .any(|name| !seen.insert(name));
    if has_duplicates {
        errors.push(ERR_DUPLICATE_NAMES.to_string());
    }

    if results.iter().any(|r| r.player_name.trim().is_empty()) {
        errors.push(ERR_EMPTY_NAME.to_string());
    }

    let upper = player_count as i64;
    if results.iter().any(|r| r.position < 1 || r.position > upper) {
        errors.push(position_range_error(player_count));
    }

    if let Some(min) = results.iter().map(|r| r.position).min() {
        if min != 1 {
            errors.push(ERR_NOT_STARTING_AT_ONE.to_string());
        }
    }

    if !positions_contiguous(results) {
        errors.push(ERR_NON_CONTIGUOUS.to_string());
    }

    ValidationOutcome::from_errors(errors)
}

/// Tie-aware contiguity: `k` players sharing position `p` push the next
/// occupied position to exactly `p + k`.
///
/// The walk starts at the lowest submitted position; whether that is 1 is a
/// separate check.
fn positions_contiguous(results: &[PlayerResult]) -> bool {
    let mut groups: BTreeMap<i64, i64> = BTreeMap::new();
    for result in results {
        *groups.entry(result.position).or_insert(0) += 1;
    }

    // `None` after the first group means the next slot is past i64::MAX
    let mut expected = None;
    for (index, (&position, &count)) in groups.iter().enumerate() {
        if index > 0 && expected != Some(position) {
            return false;
        }
        expected = position.checked_add(count);
    }

    true
}
