//! Error types.
//!
//! Every `GameError` is recoverable at the same turn: the state is left
//! untouched and the acting player is prompted again.

use crate::core::PlayerId;
use crate::movies::MovieId;
use crate::rules::PowerUp;

/// A rejected turn input or engine request.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The guessed movie is known but does not legally continue the chain.
    #[display("'{title}' does not continue the chain")]
    InvalidMove { title: String },

    /// Input carried the command marker but named no known power-up.
    #[display("Unknown command: {_0}")]
    UnknownCommand(String),

    /// The player already spent this power-up.
    #[display("{_0} has already been used")]
    PowerUpSpent(PowerUp),

    /// The guessed title is not in the catalog.
    #[display("No movie titled '{_0}'")]
    UnresolvedTitle(String),

    /// Blank input line.
    #[display("Input is empty")]
    EmptyInput,

    /// Someone other than the current player tried to act.
    #[display("It is not {_0}'s turn")]
    NotYourTurn(PlayerId),

    /// The catalog has no unused movie left to hand out.
    #[display("The catalog has no unused movies left")]
    CatalogExhausted,

    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,

    /// `GameState::setup` was handed a config that fails validation.
    #[display("Invalid configuration: {_0}")]
    InvalidConfig(ConfigError),
}

impl std::error::Error for GameError {}

/// Invalid `GameConfig`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConfigError {
    #[display("At least two players are required, got {_0}")]
    TooFewPlayers(usize),

    #[display("At most 255 players are supported, got {_0}")]
    TooManyPlayers(usize),

    #[display("Connection usage limit must be at least 1")]
    ZeroUsageLimit,

    #[display("Win target must be at least 1")]
    ZeroWinTarget,

    #[display("'{_0}' cannot be used as a command marker")]
    BadCommandMarker(char),

    /// Holds the parser message only, so `ConfigError` stays `Clone` and
    /// `PartialEq` for use inside `GameError`.
    #[display("Malformed config: {_0}")]
    Parse(String),
}

impl std::error::Error for ConfigError {}

// `CatalogLoadError` keeps its source errors; config parse errors are
// flattened to text instead.
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Failure while building a catalog.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum CatalogLoadError {
    #[display("Failed to read catalog: {_0}")]
    #[from]
    Io(std::io::Error),

    #[display("Malformed catalog JSON: {_0}")]
    #[from]
    Json(serde_json::Error),

    #[display("Duplicate movie id {_0}")]
    DuplicateId(MovieId),
}

impl std::error::Error for CatalogLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogLoadError::Io(err) => Some(err),
            CatalogLoadError::Json(err) => Some(err),
            CatalogLoadError::DuplicateId(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_messages() {
        assert_eq!(
            GameError::InvalidMove { title: "Heat".into() }.to_string(),
            "'Heat' does not continue the chain"
        );
        assert_eq!(GameError::PowerUpSpent(PowerUp::Skip).to_string(), "skip has already been used");
        assert_eq!(GameError::NotYourTurn(PlayerId::new(1)).to_string(), "It is not Seat 1's turn");
        assert_eq!(
            GameError::InvalidConfig(ConfigError::TooFewPlayers(1)).to_string(),
            "Invalid configuration: At least two players are required, got 1"
        );
    }

    #[test]
    fn test_config_parse_error_is_comparable() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let message = json_err.to_string();
        let err: ConfigError = json_err.into();
        assert_eq!(err.clone(), ConfigError::Parse(message));
    }

    #[test]
    fn test_catalog_load_error_from_json() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: CatalogLoadError = json_err.into();
        assert!(matches!(err, CatalogLoadError::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
