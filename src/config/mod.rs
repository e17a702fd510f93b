//! # Configuration Management Module
//!
//! Centralized configuration for Gorstan: type-safe sections with serde,
//! sensible defaults for every field, and TOML persistence.
//!
//! ## Configuration Structure
//!
//! - [`GameConfig`] - Core game settings (title, player name, start room)
//! - [`DebugConfig`] - Debug access, trap disabling, godmode allow-list
//! - [`StorageConfig`] - Data persistence settings
//! - [`LoggingConfig`] - Logging settings
//!
//! ## Configuration File Format
//!
//! ```toml
//! # rng_seed = 7   # pin trap placement for reproducible runs
//!
//! [game]
//! name = "Gorstan"
//! player = "Dale"
//!
//! [debug]
//! enabled = false
//! disable_traps = false
//! godmode_players = []
//!
//! [storage]
//! data_dir = "./data"
//!
//! [logging]
//! level = "info"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Core game settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    /// Display title shown in the banner.
    #[serde(default = "default_game_name")]
    pub name: String,
    /// Player name; checked case-insensitively against the godmode list.
    #[serde(default = "default_player")]
    pub player: String,
    /// Room every session and every full reset begins in. Must name a room
    /// of the shipped world.
    #[serde(default = "default_start_room")]
    pub start_room: String,
}

fn default_game_name() -> String {
    "Gorstan".to_string()
}

fn default_player() -> String {
    "Dale".to_string()
}

fn default_start_room() -> String {
    crate::engine::world::START_ROOM_ID.to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            name: default_game_name(),
            player: default_player(),
            start_room: default_start_room(),
        }
    }
}

/// Debug access controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DebugConfig {
    /// Master switch for the `/debug` command. Off means `/debug`, `/traps`,
    /// `/doors`, and `/doorsoff` are all refused.
    #[serde(default)]
    pub enabled: bool,
    /// Seed zero traps instead of the usual density.
    #[serde(default)]
    pub disable_traps: bool,
    /// Player names (case-insensitive) allowed to invoke `godmode`.
    #[serde(default)]
    pub godmode_players: Vec<String>,
}

/// Data persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: default_data_dir(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file path; stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// When set, trap placement is deterministic across runs. Kept ahead of
    /// the table sections so TOML serialization stays well-formed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file, validating as we go.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("invalid config in {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Write a default configuration file. Refuses to clobber an existing one.
    pub fn create_default(path: &str) -> Result<()> {
        if Path::new(path).exists() {
            return Err(anyhow!("config file {} already exists", path));
        }
        let content = toml::to_string_pretty(&Config::default())?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config file {}", path))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.game.player.trim().is_empty() {
            return Err(anyhow!("game.player must not be empty"));
        }
        if self.game.start_room.trim().is_empty() {
            return Err(anyhow!("game.start_room must not be empty"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(anyhow!("logging.level '{}' is not a log level", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete_and_valid() {
        let config = Config::default();
        assert_eq!(config.game.name, "Gorstan");
        assert_eq!(config.game.start_room, "controlnexus");
        assert!(!config.debug.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [game]
            player = "Polly"

            [debug]
            enabled = true
            godmode_players = ["Polly"]
            "#,
        )
        .unwrap();
        assert_eq!(config.game.player, "Polly");
        assert_eq!(config.game.name, "Gorstan");
        assert!(config.debug.enabled);
        assert_eq!(config.storage.data_dir, "./data");
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let config: Config = toml::from_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.rng_seed = Some(7);
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
