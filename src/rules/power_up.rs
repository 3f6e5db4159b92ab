//! One-shot power-ups and per-player inventories.
//!
//! Power-ups are a closed set of commands. Each player starts with one of
//! each; spending one removes it for the rest of the game.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::core::{GameError, GameState};
use crate::movies::Catalog;

/// A power-up command.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PowerUp {
    /// Pass the turn to the next player.
    Skip,
    /// Block the opponent; skips them immediately if they are the one to act.
    Block,
    /// Replace the current movie with a fresh random one.
    Escape,
}

impl PowerUp {
    /// Command name as typed after the marker.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Apply this power-up's state transition.
    ///
    /// Does not consult or touch inventories; see
    /// [`GameState::apply_command`] for the spend-once path.
    pub fn execute<C: Catalog>(self, state: &mut GameState<C>) -> Result<(), GameError> {
        match self {
            PowerUp::Skip => {
                state.skip_player();
                Ok(())
            }
            PowerUp::Block => {
                let target = state.opponent_id();
                state.block_player(target);
                Ok(())
            }
            PowerUp::Escape => state.escape_to_random_movie().map(|_| ()),
        }
    }
}

/// Power-ups a player still holds. At most one of each, and only shrinks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpSet {
    held: SmallVec<[PowerUp; 3]>,
}

impl PowerUpSet {
    /// One of every power-up.
    #[must_use]
    pub fn full() -> Self {
        Self {
            held: PowerUp::iter().collect(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            held: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, power_up: PowerUp) -> bool {
        self.held.contains(&power_up)
    }

    /// Remove `power_up`. Returns false if it was not held.
    pub fn take(&mut self, power_up: PowerUp) -> bool {
        match self.held.iter().position(|&p| p == power_up) {
            Some(pos) => {
                self.held.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = PowerUp> + '_ {
        self.held.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.held.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl Default for PowerUpSet {
    fn default() -> Self {
        Self::full()
    }
}
