//! Service layer for the scorekeeper
//!
//! This module wires the repository, validator and rating calculator into
//! the request-level operations the CLI exposes.

pub mod scoreboard;

pub use scoreboard::{
    head_to_head, GameStanding, HeadToHead, MatchSubmission, NewGame, PlayerStats, Scoreboard,
};
