//! JSON file repository implementation
//!
//! Each collection is one pretty-printed JSON array in the data directory.
//! Saves write a sibling `.tmp` file and rename it over the original, so a
//! failed write never leaves a half-written collection behind.

use crate::error::{Result, ScorekeeperError};
use crate::storage::repository::Repository;
use crate::types::{Game, MatchRecord, Player, PlayerGameRating};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const GAMES_FILE: &str = "games.json";
pub const PLAYERS_FILE: &str = "players.json";
pub const MATCHES_FILE: &str = "matches.json";
pub const RATINGS_FILE: &str = "ratings.json";

/// Repository backed by one JSON file per collection
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    data_dir: PathBuf,
}

impl JsonFileRepository {
    /// Open (and create if needed) a data directory
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| ScorekeeperError::StorageError {
            message: format!(
                "Failed to create data directory {}: {}",
                data_dir.display(),
                e
            ),
        })?;

        Ok(Self { data_dir })
    }

    /// Directory holding the collection files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(file);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ScorekeeperError::StorageError {
                    message: format!("Failed to read {}: {}", path.display(), e),
                }
                .into())
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items = serde_json::from_str(&contents).map_err(|e| {
            ScorekeeperError::StorageError {
                message: format!("Corrupt collection {}: {}", path.display(), e),
            }
        })?;
        Ok(items)
    }

    fn save<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let path = self.data_dir.join(file);
        let tmp_path = self.data_dir.join(format!("{}.tmp", file));

        let json =
            serde_json::to_string_pretty(items).map_err(|e| ScorekeeperError::StorageError {
                message: format!("Failed to serialize {}: {}", file, e),
            })?;

        fs::write(&tmp_path, json).map_err(|e| ScorekeeperError::StorageError {
            message: format!("Failed to write {}: {}", tmp_path.display(), e),
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| ScorekeeperError::StorageError {
            message: format!("Failed to replace {}: {}", path.display(), e),
        })?;

        debug!("Saved {} entries to {}", items.len(), path.display());
        Ok(())
    }
}

impl Repository for JsonFileRepository {
    fn load_games(&self) -> Result<Vec<Game>> {
        self.load(GAMES_FILE)
    }

    fn save_games(&self, games: &[Game]) -> Result<()> {
        self.save(GAMES_FILE, games)
    }

    fn load_players(&self) -> Result<Vec<Player>> {
        self.load(PLAYERS_FILE)
    }

    fn save_players(&self, players: &[Player]) -> Result<()> {
        self.save(PLAYERS_FILE, players)
    }

    fn load_matches(&self) -> Result<Vec<MatchRecord>> {
        self.load(MATCHES_FILE)
    }

    fn save_matches(&self, matches: &[MatchRecord]) -> Result<()> {
        self.save(MATCHES_FILE, matches)
    }

    fn load_ratings(&self) -> Result<Vec<PlayerGameRating>> {
        self.load(RATINGS_FILE)
    }

    fn save_ratings(&self, ratings: &[PlayerGameRating]) -> Result<()> {
        self.save(RATINGS_FILE, ratings)
    }
}
