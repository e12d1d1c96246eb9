//! Tunable starting values, read from `assets/config/game.ron`.
//!
//! A missing or malformed file is not fatal: the game logs a warning and
//! starts with the built-in defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::shared::PLAYER_SPEED;

pub const CONFIG_PATH: &str = "assets/config/game.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub starting_cash: u32,
    pub starting_bank: u32,
    pub starting_card: u32,
    /// Pixels per tick along each held axis.
    pub player_speed: f32,
    /// Seconds before an unanswered hint request falls back.
    pub hint_timeout_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_x: 380.0,
            start_y: 400.0,
            starting_cash: 100,
            starting_bank: 500,
            starting_card: 50,
            player_speed: PLAYER_SPEED,
            hint_timeout_secs: 8.0,
        }
    }
}

impl GameConfig {
    pub fn from_ron(path: &Path, text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(path, &text)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("[Config] Loaded {}", path.display());
                config
            }
            Err(err) => {
                warn!("[Config] {err}; using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_fields() {
        let config =
            GameConfig::from_ron(Path::new("game.ron"), "(starting_cash: 250)").unwrap();
        assert_eq!(config.starting_cash, 250);
        assert_eq!(config.starting_bank, GameConfig::default().starting_bank);
        assert_eq!(config.player_speed, PLAYER_SPEED);
    }

    #[test]
    fn test_default_speed_is_the_walking_step() {
        assert_eq!(GameConfig::default().player_speed, PLAYER_SPEED);
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let err = GameConfig::from_ron(Path::new("game.ron"), "(starting_cash: \"lots\")")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default(Path::new("does/not/exist.ron"));
        assert_eq!(config, GameConfig::default());
    }
}
