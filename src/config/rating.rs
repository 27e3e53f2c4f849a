//! Rating parameter defaults and bounds for newly registered games

use serde::{Deserialize, Serialize};

/// Defaults applied when a game is registered without explicit parameters,
/// and the bounds every game's parameters must fall within
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub default_k_factor: f64,
    pub default_rating: f64,
    pub min_k_factor: f64,
    pub max_k_factor: f64,
    pub min_default_rating: f64,
    pub max_default_rating: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_k_factor: 32.0,
            default_rating: 1500.0,
            min_k_factor: 1.0,
            max_k_factor: 100.0,
            min_default_rating: 0.0,
            max_default_rating: 5000.0,
        }
    }
}

impl RatingConfig {
    /// Check a game's K-factor against the configured bounds
    pub fn check_k_factor(&self, k_factor: f64) -> Result<(), String> {
        if !k_factor.is_finite() || k_factor < self.min_k_factor || k_factor > self.max_k_factor {
            return Err(format!(
                "K-factor must be between {} and {}",
                self.min_k_factor, self.max_k_factor
            ));
        }
        Ok(())
    }

    /// Check a game's starting rating against the configured bounds
    pub fn check_default_rating(&self, rating: f64) -> Result<(), String> {
        if !rating.is_finite()
            || rating < self.min_default_rating
            || rating > self.max_default_rating
        {
            return Err(format!(
                "Default rating must be between {} and {}",
                self.min_default_rating, self.max_default_rating
            ));
        }
        Ok(())
    }

    /// Validate the bounds and that the defaults sit inside them
    pub fn validate(&self) -> Result<(), String> {
        if self.min_k_factor < 0.0 || self.min_k_factor > self.max_k_factor {
            return Err("K-factor bounds are inverted or negative".to_string());
        }
        if self.min_default_rating < 0.0 || self.min_default_rating > self.max_default_rating {
            return Err("Default rating bounds are inverted or negative".to_string());
        }
        self.check_k_factor(self.default_k_factor)?;
        self.check_default_rating(self.default_rating)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RatingConfig::default();
        assert_eq!(config.default_k_factor, 32.0);
        assert_eq!(config.default_rating, 1500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_k_factor_bounds() {
        let config = RatingConfig::default();
        assert!(config.check_k_factor(1.0).is_ok());
        assert!(config.check_k_factor(100.0).is_ok());
        assert!(config.check_k_factor(0.5).is_err());
        assert!(config.check_k_factor(101.0).is_err());
        assert!(config.check_k_factor(f64::NAN).is_err());
    }

    #[test]
    fn test_default_rating_bounds() {
        let config = RatingConfig::default();
        assert!(config.check_default_rating(0.0).is_ok());
        assert!(config.check_default_rating(-1.0).is_err());
        assert!(config.check_default_rating(5001.0).is_err());
    }

    #[test]
    fn test_default_outside_bounds_is_invalid() {
        let config = RatingConfig {
            default_k_factor: 200.0,
            ..RatingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RatingConfig {
            min_k_factor: 50.0,
            max_k_factor: 10.0,
            ..RatingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
