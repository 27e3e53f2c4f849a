//! Repository interface over the four persisted collections
//!
//! Each collection is read whole and written back whole. Callers load,
//! mutate in memory and save, so a failed save leaves the previously
//! persisted collection untouched.

use crate::error::Result;
use crate::types::{Game, MatchRecord, Player, PlayerGameRating};

/// Trait for collection-level persistence
#[cfg_attr(test, mockall::automock)]
pub trait Repository: Send + Sync {
    fn load_games(&self) -> Result<Vec<Game>>;

    fn save_games(&self, games: &[Game]) -> Result<()>;

    fn load_players(&self) -> Result<Vec<Player>>;

    fn save_players(&self, players: &[Player]) -> Result<()>;

    /// Matches in submission order
    fn load_matches(&self) -> Result<Vec<MatchRecord>>;

    fn save_matches(&self, matches: &[MatchRecord]) -> Result<()>;

    fn load_ratings(&self) -> Result<Vec<PlayerGameRating>>;

    fn save_ratings(&self, ratings: &[PlayerGameRating]) -> Result<()>;
}
