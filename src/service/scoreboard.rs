//! Scoreboard service
//!
//! Coordinates the repository, the result validator and the rating
//! calculator: game registration, match submission, leaderboards and
//! match history.

use crate::config::RatingConfig;
use crate::error::{Result, ScorekeeperError};
use crate::rating::{EloRatingCalculator, RatingCalculator};
use crate::storage::Repository;
use crate::types::{
    Game, LeaderboardEntry, MatchParticipant, MatchRecord, Participant, Player, PlayerGameRating,
    PlayerResult,
};
use crate::utils::{current_timestamp, generate_id, normalize_name};
use crate::validation;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Request to register a new game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGame {
    pub name: String,
    pub description: Option<String>,
    /// Falls back to the configured default when absent
    pub k_factor: Option<f64>,
    /// Falls back to the configured default when absent
    pub default_rating: Option<f64>,
}

/// A match result as entered by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSubmission {
    /// Game name or id
    pub game: String,
    pub results: Vec<PlayerResult>,
    pub notes: Option<String>,
}

/// A player's standing in one game, with the game's name resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStanding {
    pub game_name: String,
    pub rating: PlayerGameRating,
}

/// Everything recorded about one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player: Player,
    pub standings: Vec<GameStanding>,
}

/// Head-to-head tallies for one player of a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadToHead {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

/// Compare `position` against every other position of the match
///
/// `positions` includes the player's own entry at `index`, which is skipped.
/// An `index` outside `positions` yields an empty tally.
pub fn head_to_head(positions: &[u32], index: usize) -> HeadToHead {
    let Some(&own) = positions.get(index) else {
        return HeadToHead::default();
    };
    let mut tally = HeadToHead::default();

    for (i, other) in positions.iter().enumerate() {
        if i == index {
            continue;
        }
        match own.cmp(other) {
            Ordering::Less => tally.wins += 1,
            Ordering::Greater => tally.losses += 1,
            Ordering::Equal => tally.draws += 1,
        }
    }

    tally
}

/// Scorekeeping service over an injected repository
pub struct Scoreboard {
    repository: Arc<dyn Repository>,
    calculator: Arc<dyn RatingCalculator>,
    config: RatingConfig,
}

impl Scoreboard {
    /// Create a scoreboard rating matches with multi-player Elo
    pub fn new(repository: Arc<dyn Repository>, config: RatingConfig) -> Self {
        Self::with_calculator(repository, Arc::new(EloRatingCalculator::new()), config)
    }

    /// Create a scoreboard with a specific rating calculator
    pub fn with_calculator(
        repository: Arc<dyn Repository>,
        calculator: Arc<dyn RatingCalculator>,
        config: RatingConfig,
    ) -> Self {
        Self {
            repository,
            calculator,
            config,
        }
    }

    /// Register a new game, applying configured defaults for missing parameters
    pub fn register_game(&self, request: NewGame) -> Result<Game> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(ScorekeeperError::InvalidGame {
                reason: "Game name cannot be empty".to_string(),
            }
            .into());
        }

        let k_factor = request.k_factor.unwrap_or(self.config.default_k_factor);
        let default_rating = request
            .default_rating
            .unwrap_or(self.config.default_rating);

        self.config
            .check_k_factor(k_factor)
            .and_then(|_| self.config.check_default_rating(default_rating))
            .map_err(|reason| ScorekeeperError::InvalidGame { reason })?;

        let mut games = self.repository.load_games()?;
        let key = normalize_name(&name);
        if games.iter().any(|g| normalize_name(&g.name) == key) {
            return Err(ScorekeeperError::DuplicateGame { name }.into());
        }

        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let game = Game {
            id: generate_id(),
            name,
            description,
            k_factor,
            default_rating,
            created_at: current_timestamp(),
        };

        games.push(game.clone());
        self.repository.save_games(&games)?;

        info!(
            "Registered game '{}' ({}) with k_factor={} default_rating={}",
            game.name, game.id, game.k_factor, game.default_rating
        );
        Ok(game)
    }

    /// All games, sorted by name
    pub fn list_games(&self) -> Result<Vec<Game>> {
        let mut games = self.repository.load_games()?;
        games.sort_by_key(|g| normalize_name(&g.name));
        Ok(games)
    }

    /// Look a game up by id or by case-insensitive name
    pub fn find_game(&self, game: &str) -> Result<Game> {
        let games = self.repository.load_games()?;
        find_game_in(&games, game)
            .cloned()
            .ok_or_else(|| {
                ScorekeeperError::GameNotFound {
                    game: game.to_string(),
                }
                .into()
            })
    }

    /// Remove a game together with its ratings and match history
    pub fn delete_game(&self, game: &str) -> Result<Game> {
        let mut games = self.repository.load_games()?;
        let removed = find_game_in(&games, game)
            .cloned()
            .ok_or_else(|| ScorekeeperError::GameNotFound {
                game: game.to_string(),
            })?;

        let mut matches = self.repository.load_matches()?;
        matches.retain(|m| m.game_id != removed.id);
        let mut ratings = self.repository.load_ratings()?;
        ratings.retain(|r| r.game_id != removed.id);
        games.retain(|g| g.id != removed.id);

        self.repository.save_matches(&matches)?;
        self.repository.save_ratings(&ratings)?;
        self.repository.save_games(&games)?;

        info!("Removed game '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// All players, sorted by name
    pub fn list_players(&self) -> Result<Vec<Player>> {
        let mut players = self.repository.load_players()?;
        players.sort_by_key(|p| normalize_name(&p.name));
        Ok(players)
    }

    /// Validate, rate and record a match
    ///
    /// Players named for the first time are created. On invalid input every
    /// validation error is returned in `ScorekeeperError::InvalidMatchResult`
    /// and nothing is written.
    pub fn submit_match(&self, submission: MatchSubmission) -> Result<MatchRecord> {
        let outcome = validation::validate(&submission.results);
        if !outcome.is_valid {
            warn!(
                "Rejected match for '{}': {}",
                submission.game,
                outcome.errors.join("; ")
            );
            return Err(ScorekeeperError::InvalidMatchResult {
                errors: outcome.errors,
            }
            .into());
        }

        let game = self.find_game(&submission.game)?;
        let now = current_timestamp();

        // Resolve or create every named player
        let mut players = self.repository.load_players()?;
        let mut new_players = 0;
        let mut match_players = Vec::with_capacity(submission.results.len());
        for result in &submission.results {
            let key = normalize_name(&result.player_name);
            let player = match players.iter().find(|p| normalize_name(&p.name) == key) {
                Some(existing) => existing.clone(),
                None => {
                    let created = Player {
                        id: generate_id(),
                        name: result.player_name.trim().to_string(),
                        created_at: now,
                    };
                    debug!("Creating player '{}' ({})", created.name, created.id);
                    players.push(created.clone());
                    new_players += 1;
                    created
                }
            };
            match_players.push(player);
        }

        let mut ratings = self.repository.load_ratings()?;
        let participants: Vec<Participant> = match_players
            .iter()
            .zip(&submission.results)
            .map(|(player, result)| Participant {
                player_id: player.id,
                // Validation guarantees 1..=N
                position: result.position as u32,
                current_rating: ratings
                    .iter()
                    .find(|r| r.player_id == player.id && r.game_id == game.id)
                    .map(|r| r.rating)
                    .unwrap_or(game.default_rating),
            })
            .collect();

        let rating_results = self
            .calculator
            .calculate_rating_changes(&participants, game.k_factor);

        let positions: Vec<u32> = participants.iter().map(|p| p.position).collect();
        let mut match_participants = Vec::with_capacity(participants.len());
        for (index, ((player, participant), result)) in match_players
            .iter()
            .zip(&participants)
            .zip(&rating_results)
            .enumerate()
        {
            let tally = head_to_head(&positions, index);

            let slot = match ratings
                .iter()
                .position(|r| r.player_id == player.id && r.game_id == game.id)
            {
                Some(slot) => slot,
                None => {
                    ratings.push(PlayerGameRating::new(player.id, &game, now));
                    ratings.len() - 1
                }
            };
            let record = &mut ratings[slot];
            record.rating = result.new_rating as f64;
            record.games_played += 1;
            record.wins += tally.wins;
            record.losses += tally.losses;
            record.draws += tally.draws;
            record.last_played = now;

            match_participants.push(MatchParticipant {
                player_id: player.id,
                player_name: player.name.clone(),
                position: participant.position,
                rating_before: result.previous_rating,
                rating_after: result.new_rating,
                rating_change: result.rating_change,
            });
        }

        let record = MatchRecord {
            id: generate_id(),
            game_id: game.id,
            played_at: now,
            notes: submission
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            participants: match_participants,
        };

        let mut matches = self.repository.load_matches()?;
        matches.push(record.clone());

        if new_players > 0 {
            self.repository.save_players(&players)?;
        }
        self.repository.save_ratings(&ratings)?;
        self.repository.save_matches(&matches)?;

        info!(
            "Recorded {} match {} with {} players ({} new) using {}",
            game.name,
            record.id,
            record.participants.len(),
            new_players,
            self.calculator.name()
        );
        Ok(record)
    }

    /// Ratings for a game, best first
    pub fn leaderboard(&self, game: &str) -> Result<Vec<LeaderboardEntry>> {
        let game = self.find_game(game)?;
        let players: HashMap<Uuid, Player> = self
            .repository
            .load_players()?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut rows: Vec<(PlayerGameRating, String)> = self
            .repository
            .load_ratings()?
            .into_iter()
            .filter(|r| r.game_id == game.id)
            .map(|r| {
                let name = players
                    .get(&r.player_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| r.player_id.to_string());
                (r, name)
            })
            .collect();

        rows.sort_by(|(a, a_name), (b, b_name)| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| normalize_name(a_name).cmp(&normalize_name(b_name)))
        });

        let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(rows.len());
        for (index, (rating, name)) in rows.into_iter().enumerate() {
            let rank = match entries.last() {
                Some(previous) if previous.rating == rating.rating => previous.rank,
                _ => index as u32 + 1,
            };
            entries.push(LeaderboardEntry {
                rank,
                player_id: rating.player_id,
                player_name: name,
                rating: rating.rating,
                games_played: rating.games_played,
                wins: rating.wins,
                losses: rating.losses,
                draws: rating.draws,
                win_rate: rating.win_rate(),
            });
        }

        Ok(entries)
    }

    /// Matches of a game, newest first
    pub fn match_history(&self, game: &str, limit: Option<usize>) -> Result<Vec<MatchRecord>> {
        let game = self.find_game(game)?;
        let history = self
            .repository
            .load_matches()?
            .into_iter()
            .rev()
            .filter(|m| m.game_id == game.id)
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        Ok(history)
    }

    /// A player's standing in every game they have played
    pub fn player_stats(&self, name: &str) -> Result<PlayerStats> {
        let key = normalize_name(name);
        let player = self
            .repository
            .load_players()?
            .into_iter()
            .find(|p| normalize_name(&p.name) == key)
            .ok_or_else(|| ScorekeeperError::PlayerNotFound {
                player: name.to_string(),
            })?;

        let games = self.repository.load_games()?;
        let mut standings: Vec<GameStanding> = self
            .repository
            .load_ratings()?
            .into_iter()
            .filter(|r| r.player_id == player.id)
            .filter_map(|rating| {
                games
                    .iter()
                    .find(|g| g.id == rating.game_id)
                    .map(|g| GameStanding {
                        game_name: g.name.clone(),
                        rating,
                    })
            })
            .collect();
        standings.sort_by_key(|s| normalize_name(&s.game_name));

        Ok(PlayerStats { player, standings })
    }
}

fn find_game_in<'a>(games: &'a [Game], game: &str) -> Option<&'a Game> {
    if let Ok(id) = Uuid::parse_str(game.trim()) {
        if let Some(found) = games.iter().find(|g| g.id == id) {
            return Some(found);
        }
    }
    let key = normalize_name(game);
    games.iter().find(|g| normalize_name(&g.name) == key)
}
