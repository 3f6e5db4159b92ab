//! Game outcomes.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// No winner: the game was stopped before anyone won.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winning seat, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}
