//! In-memory repository implementation

use crate::error::{Result, ScorekeeperError};
use crate::storage::repository::Repository;
use crate::types::{Game, MatchRecord, Player, PlayerGameRating};
use std::sync::RwLock;

/// Repository that keeps every collection in process memory
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    games: RwLock<Vec<Game>>,
    players: RwLock<Vec<Player>>,
    matches: RwLock<Vec<MatchRecord>>,
    ratings: RwLock<Vec<PlayerGameRating>>,
}

impl InMemoryRepository {
    /// Create an empty in-memory repository
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T: Clone>(collection: &RwLock<Vec<T>>, name: &str) -> Result<Vec<T>> {
    let items = collection
        .read()
        .map_err(|_| ScorekeeperError::StorageError {
            message: format!("Failed to acquire {} read lock", name),
        })?;
    Ok(items.clone())
}

fn write<T: Clone>(collection: &RwLock<Vec<T>>, name: &str, items: &[T]) -> Result<()> {
    let mut stored = collection
        .write()
        .map_err(|_| ScorekeeperError::StorageError {
            message: format!("Failed to acquire {} write lock", name),
        })?;
    *stored = items.to_vec();
    Ok(())
}

impl Repository for InMemoryRepository {
    fn load_games(&self) -> Result<Vec<Game>> {
        read(&self.games, "games")
    }

    fn save_games(&self, games: &[Game]) -> Result<()> {
        write(&self.games, "games", games)
    }

    fn load_players(&self) -> Result<Vec<Player>> {
        read(&self.players, "players")
    }

    fn save_players(&self, players: &[Player]) -> Result<()> {
        write(&self.players, "players", players)
    }

    fn load_matches(&self) -> Result<Vec<MatchRecord>> {
        read(&self.matches, "matches")
    }

    fn save_matches(&self, matches: &[MatchRecord]) -> Result<()> {
        write(&self.matches, "matches", matches)
    }

    fn load_ratings(&self) -> Result<Vec<PlayerGameRating>> {
        read(&self.ratings, "ratings")
    }

    fn save_ratings(&self, ratings: &[PlayerGameRating]) -> Result<()> {
        write(&self.ratings, "ratings", ratings)
    }
}
