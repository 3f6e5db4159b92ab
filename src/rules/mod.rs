//! Game rules: moves, win conditions, power-ups, and outcomes.
//!
//! These are the pieces `GameState` combines. Each is usable on its own:
//! - `Move`: an immutable connection record
//! - `WinCondition`: per-player target and its random-generation policy
//! - `PowerUp` / `PowerUpSet`: one-shot commands and their inventories
//! - `GameResult`: how a game ended

pub mod moves;
pub mod win;
pub mod power_up;
pub mod result;

pub use moves::Move;
pub use win::{WinCondition, COMMON_GENRES, FALLBACK_GENRE};
pub use power_up::{PowerUp, PowerUpSet};
pub use result::GameResult;
