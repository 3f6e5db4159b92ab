//! Classifying a raw input line as a power-up command or a title guess.

use crate::core::GameError;
use crate::rules::PowerUp;

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Marker-prefixed power-up name.
    Command(PowerUp),
    /// Anything else: a movie title to resolve against the catalog.
    Guess(String),
}

impl Input {
    /// Parse a line typed by the current player.
    ///
    /// Surrounding whitespace is ignored. A line starting with `marker` must
    /// name a power-up (case-insensitive).
    pub fn parse(text: &str, marker: char) -> Result<Self, GameError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GameError::EmptyInput);
        }

        match text.strip_prefix(marker) {
            Some(name) => {
                let name = name.trim();
                name.parse::<PowerUp>()
                    .map(Input::Command)
                    .map_err(|_| GameError::UnknownCommand(name.to_string()))
            }
            None => Ok(Input::Guess(text.to_string())),
        }
    }
}
