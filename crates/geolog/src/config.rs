//! Configuration management for geolog.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Command-line flags
//! 2. Environment variables (GEOLOG_*)
//! 3. Config file (~/.geolog/config.toml)
//! 4. Default values

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: Option<PathBuf>,
}

impl Config {
    /// Path to the config file (~/.geolog/config.toml)
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".geolog")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {:?}", path))
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the database path for a command.
    ///
    /// Precedence: flag > GEOLOG_DATABASE_PATH > config file > default.
    pub fn resolve_database(&self, flag: Option<PathBuf>) -> PathBuf {
        if let Some(path) = flag {
            return path;
        }
        if let Ok(path) = std::env::var("GEOLOG_DATABASE_PATH") {
            return PathBuf::from(path);
        }
        if let Some(path) = &self.database.path {
            return path.clone();
        }
        Self::default_database_path()
    }

    /// Default database location (~/.geolog/geolog.db)
    pub fn default_database_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".geolog")
            .join("geolog.db")
    }
}
