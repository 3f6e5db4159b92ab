//! # movie-chain
//!
//! Engine for a turn-based movie-connection game. Players take turns naming
//! a movie that shares an attribute (actor, director, writer,
//! cinematographer, composer, or genre) with the movie currently in play.
//!
//! ## Rules in brief
//!
//! 1. **No repeats**: a movie can enter play once per game.
//!
//! 2. **Connection fatigue**: each (attribute, value) pair links movies at
//!    most three times.
//!
//! 3. **Secret goals**: every player has a win condition such as "play five
//!    Horror movies". The first to meet theirs wins; if a turn clock runs
//!    out, the player who ran out loses.
//!
//! 4. **Power-ups**: one Skip, one Block and one Escape per player.
//!
//! ## Modules
//!
//! - `core`: Players, state, RNG, configuration, errors
//! - `movies`: Movie records, the catalog, and title suggestions
//! - `rules`: Moves, win conditions, power-ups, results
//! - `session`: Input parsing and the turn-clocked session task
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod core;
pub mod movies;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Player, PlayerId, PlayerMap,
    GameRng,
    GameConfig,
    GameError, ConfigError, CatalogLoadError,
    GameState, GameSnapshot,
};

pub use crate::movies::{Catalog, ConnectionType, Movie, MovieCatalog, MovieId, Suggester};

pub use crate::rules::{GameResult, Move, PowerUp, PowerUpSet, WinCondition};

pub use crate::session::{spawn_session, Input, SessionCommand, SessionUpdate};
