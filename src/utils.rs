//! Utility functions for the scorekeeper

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique identifier for games, players and matches
pub fn generate_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Comparison key for player and game names: trimmed and case-folded
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Render a rating change with an explicit sign, e.g. `+16` or `-16`
pub fn format_rating_change(change: i64) -> String {
    if change > 0 {
        format!("+{}", change)
    } else {
        change.to_string()
    }
}

/// Render a stored rating as a whole number
pub fn format_rating(rating: f64) -> String {
    format!("{:.0}", rating)
}

/// Render a win rate in the 0.0..=1.0 range as a percentage
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Render a timestamp for list output
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}
