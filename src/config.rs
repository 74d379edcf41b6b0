//! Game setup parameters.
//!
//! Defaults reproduce the stock skirmish: an 8x8 board, four units per side
//! drawn from the three archetypes of that side, levels 1 to 3.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{check_size, DEFAULT_BOARD_SIZE};
use crate::error::EngineError;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] EngineError),
}

/// Parameters for a new game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board dimension; the board has `board_size * board_size` cells.
    pub board_size: usize,
    /// Archetype names the player's roster draws from.
    pub player_archetypes: Vec<String>,
    /// Archetype names the opponent's roster draws from.
    pub enemy_archetypes: Vec<String>,
    /// Units per side.
    pub unit_count: usize,
    /// Highest level a generated unit can have (levels start at 1).
    pub max_level: u32,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Whether the opponent answers automatically after each player action.
    pub auto_reply: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            player_archetypes: vec!["Bowman".into(), "Swordsman".into(), "Magician".into()],
            enemy_archetypes: vec!["Daemon".into(), "Undead".into(), "Vampire".into()],
            unit_count: 4,
            max_level: 3,
            seed: None,
            auto_reply: true,
        }
    }
}

impl GameConfig {
    /// Parses a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks the board can hold both deployment zones and both rosters.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_size(self.board_size)?;
        let zone = 2 * self.board_size;
        if self.unit_count > zone {
            return Err(EngineError::InvalidConfig(format!(
                "{} units do not fit a {}-cell deployment zone",
                self.unit_count, zone
            )));
        }
        if self.max_level == 0 {
            return Err(EngineError::InvalidConfig("max level must be at least 1".into()));
        }
        Ok(())
    }
}
