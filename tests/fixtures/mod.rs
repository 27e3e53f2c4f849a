//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use scorekeeper::config::RatingConfig;
use scorekeeper::rating::{elo, RatingCalculator};
use scorekeeper::service::{MatchSubmission, NewGame, Scoreboard};
use scorekeeper::types::{Participant, PlayerResult, RatingResult};
use scorekeeper::{InMemoryRepository, JsonFileRepository};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Rating calculator that records every call and delegates to Elo
#[derive(Debug, Default)]
pub struct RecordingCalculator {
    calls: Mutex<Vec<(Vec<Participant>, f64)>>,
}

impl RecordingCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all calculation calls made
    pub fn calls(&self) -> Vec<(Vec<Participant>, f64)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl RatingCalculator for RecordingCalculator {
    fn calculate_rating_changes(
        &self,
        participants: &[Participant],
        k_factor: f64,
    ) -> Vec<RatingResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((participants.to_vec(), k_factor));
        }
        elo::rate(participants, k_factor)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Scoreboard over a fresh in-memory repository
pub fn memory_scoreboard() -> Scoreboard {
    Scoreboard::new(Arc::new(InMemoryRepository::new()), RatingConfig::default())
}

/// Scoreboard over a JSON data directory
pub fn json_scoreboard(dir: &Path) -> Scoreboard {
    let repository = JsonFileRepository::open(dir).expect("open data dir");
    Scoreboard::new(Arc::new(repository), RatingConfig::default())
}

pub fn game(name: &str, k_factor: f64, default_rating: f64) -> NewGame {
    NewGame {
        name: name.to_string(),
        description: None,
        k_factor: Some(k_factor),
        default_rating: Some(default_rating),
    }
}

pub fn submission(game: &str, entries: &[(&str, i64)]) -> MatchSubmission {
    MatchSubmission {
        game: game.to_string(),
        results: entries
            .iter()
            .map(|(name, position)| PlayerResult::new(*name, *position))
            .collect(),
        notes: None,
    }
}
