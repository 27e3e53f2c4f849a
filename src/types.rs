//! Common types used throughout the scorekeeper

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = Uuid;

/// Unique identifier for games
pub type GameId = Uuid;

/// Unique identifier for recorded matches
pub type MatchId = Uuid;

/// A participant in a single match, as fed to the rating engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub player_id: PlayerId,
    /// Finishing position, 1 = first place. Equal positions are a draw.
    pub position: u32,
    pub current_rating: f64,
}

/// Rating outcome for one participant of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    pub player_id: PlayerId,
    pub previous_rating: f64,
    /// Never negative
    pub new_rating: i64,
    pub rating_change: i64,
}

/// A submitted (player name, finishing position) pair awaiting validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player_name: String,
    pub position: i64,
}

impl PlayerResult {
    pub fn new(player_name: impl Into<String>, position: i64) -> Self {
        Self {
            player_name: player_name.into(),
            position,
        }
    }
}

/// A registered game with its rating parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub description: Option<String>,
    pub k_factor: f64,
    pub default_rating: f64,
    pub created_at: DateTime<Utc>,
}

/// A person who has taken part in at least one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A player's standing in one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGameRating {
    pub player_id: PlayerId,
    pub game_id: GameId,
    pub rating: f64,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub last_played: DateTime<Utc>,
}

impl PlayerGameRating {
    /// Create a fresh record at the game's default rating
    pub fn new(player_id: PlayerId, game: &Game, now: DateTime<Utc>) -> Self {
        Self {
            player_id,
            game_id: game.id,
            rating: game.default_rating,
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            last_played: now,
        }
    }

    /// Share of head-to-head comparisons won, 0.0 when nothing has been played
    pub fn win_rate(&self) -> f64 {
        let total = self.wins + self.losses + self.draws;
        if total == 0 {
            return 0.0;
        }
        self.wins as f64 / total as f64
    }
}

/// One line of a recorded match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchParticipant {
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: u32,
    pub rating_before: f64,
    pub rating_after: i64,
    pub rating_change: i64,
}

/// Immutable record of a submitted match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub game_id: GameId,
    pub played_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub participants: Vec<MatchParticipant>,
}

impl MatchRecord {
    /// Names of the players sharing first place
    pub fn winners(&self) -> Vec<&str> {
        let best = self.participants.iter().map(|p| p.position).min();
        self.participants
            .iter()
            .filter(|p| Some(p.position) == best)
            .map(|p| p.player_name.as_str())
            .collect()
    }
}

/// Leaderboard row for a single game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Competition rank; equal ratings share a rank
    pub rank: u32,
    pub player_id: PlayerId,
    pub player_name: String,
    pub rating: f64,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game {
            id: Uuid::new_v4(),
            name: "Catan".to_string(),
            description: None,
            k_factor: 32.0,
            default_rating: 1200.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_rating_starts_at_game_default() {
        let game = game();
        let rating = PlayerGameRating::new(Uuid::new_v4(), &game, Utc::now());
        assert_eq!(rating.rating, 1200.0);
        assert_eq!(rating.game_id, game.id);
        assert_eq!(rating.games_played, 0);
        assert_eq!(rating.win_rate(), 0.0);
    }

    #[test]
    fn test_win_rate_counts_draws() {
        let mut rating = PlayerGameRating::new(Uuid::new_v4(), &game(), Utc::now());
        rating.wins = 2;
        rating.losses = 1;
        rating.draws = 1;
        assert_eq!(rating.win_rate(), 0.5);
    }

    #[test]
    fn test_match_winners_include_ties() {
        let participant = |name: &str, position| MatchParticipant {
            player_id: Uuid::new_v4(),
            player_name: name.to_string(),
            position,
            rating_before: 1500.0,
            rating_after: 1500,
            rating_change: 0,
        };
        let record = MatchRecord {
            id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            played_at: Utc::now(),
            notes: None,
            participants: vec![
                participant("Carol", 3),
                participant("Alice", 1),
                participant("Bob", 1),
            ],
        };
        assert_eq!(record.winners(), vec!["Alice", "Bob"]);
    }
}
