//! Game configuration.
//!
//! One `GameConfig` describes a whole game: who is playing, how strict the
//! connection rules are, how win conditions are drawn, and how long a turn
//! may last. Built with `Default` plus `with_*` setters, or deserialized.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Maximum times a single (connection type, value) pair may be used.
pub const DEFAULT_CONNECTION_USAGE_LIMIT: u32 = 3;

/// Matching moves a player needs to meet their win condition.
pub const DEFAULT_WIN_TARGET: u32 = 5;

/// Prefix that marks an input line as a power-up command.
pub const DEFAULT_COMMAND_MARKER: char = '!';

/// Configuration for a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display names, in seat order.
    pub player_names: Vec<String>,

    /// Seed for every random choice the engine makes.
    pub seed: u64,

    /// Uses allowed per (connection type, value) pair.
    pub connection_usage_limit: u32,

    /// Requested win-condition target. May be clamped down to what the
    /// catalog can supply.
    pub win_target: u32,

    /// Draw win conditions from genres only.
    pub genre_only_win_conditions: bool,

    /// Per-turn clock. `None` disables time expiry.
    pub turn_time_limit: Option<Duration>,

    /// Prefix that selects a power-up instead of a title guess.
    pub command_marker: char,

    /// Maximum number of title suggestions offered per prefix.
    pub suggestion_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            seed: 42,
            connection_usage_limit: DEFAULT_CONNECTION_USAGE_LIMIT,
            win_target: DEFAULT_WIN_TARGET,
            genre_only_win_conditions: true,
            turn_time_limit: Some(Duration::from_secs(30)),
            command_marker: DEFAULT_COMMAND_MARKER,
            suggestion_limit: 5,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_win_target(mut self, target: u32) -> Self {
        self.win_target = target;
        self
    }

    /// Allow actor, director, writer, cinematographer and composer
    /// win conditions as well as genres.
    #[must_use]
    pub fn with_any_win_condition(mut self) -> Self {
        self.genre_only_win_conditions = false;
        self
    }

    #[must_use]
    pub fn with_turn_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.turn_time_limit = limit;
        self
    }

    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_names.len() < 2 {
            return Err(ConfigError::TooFewPlayers(self.player_names.len()));
        }
        if self.player_names.len() > 255 {
            return Err(ConfigError::TooManyPlayers(self.player_names.len()));
        }
        if self.connection_usage_limit == 0 {
            return Err(ConfigError::ZeroUsageLimit);
        }
        if self.win_target == 0 {
            return Err(ConfigError::ZeroWinTarget);
        }
        if self.command_marker.is_alphanumeric() || self.command_marker.is_whitespace() {
            return Err(ConfigError::BadCommandMarker(self.command_marker));
        }
        Ok(())
    }
}
