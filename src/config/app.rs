//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! scorekeeper, including environment variable loading and validation.

use crate::config::rating::RatingConfig;
use crate::error::ScorekeeperError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where the four collections live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per collection in `data_dir`
    Json,
    /// Process-local, discarded on exit
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory holding games.json, players.json, matches.json and ratings.json
    pub data_dir: PathBuf,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "scorekeeper".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            data_dir: PathBuf::from(".scorekeeper"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file alone, ignoring the environment
    pub fn parse_file(path: &Path) -> Result<Self> {
        let config = Self::read_file(path)?;
        validate_config(&config)?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Storage settings
        if let Ok(backend) = env::var("STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Ok(dir) = env::var("DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }

        // Rating settings
        if let Ok(k) = env::var("DEFAULT_K_FACTOR") {
            self.rating.default_k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_K_FACTOR value: {}", k))?;
        }
        if let Ok(rating) = env::var("DEFAULT_RATING") {
            self.rating.default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_RATING value: {}", rating))?;
        }
        if let Ok(k) = env::var("MIN_K_FACTOR") {
            self.rating.min_k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid MIN_K_FACTOR value: {}", k))?;
        }
        if let Ok(k) = env::var("MAX_K_FACTOR") {
            self.rating.max_k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_K_FACTOR value: {}", k))?;
        }
        if let Ok(rating) = env::var("MAX_DEFAULT_RATING") {
            self.rating.max_default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_DEFAULT_RATING value: {}", rating))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.storage.backend == StorageBackend::Json
        && config.storage.data_dir.as_os_str().is_empty()
    {
        return Err(anyhow!("Data directory cannot be empty"));
    }

    config
        .rating
        .validate()
        .map_err(|message| ScorekeeperError::ConfigurationError {
            message: format!("Invalid rating configuration: {}", message),
        })?;

    Ok(())
}
