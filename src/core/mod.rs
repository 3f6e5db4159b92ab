//! Core engine types: players, state, RNG, configuration, errors.
//!
//! `GameState` is the only thing that changes during a game. Everything else
//! here is either an identifier, a container, or configuration read at setup.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{
    GameConfig, DEFAULT_COMMAND_MARKER, DEFAULT_CONNECTION_USAGE_LIMIT, DEFAULT_WIN_TARGET,
};
pub use error::{CatalogLoadError, ConfigError, GameError};
pub use state::{GameSnapshot, GameState};
