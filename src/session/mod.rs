//! Running a game: input parsing and the session task.
//!
//! A session owns its `GameState` outright. Player input and the turn clock
//! both arrive as events on one task, so state changes never interleave.

pub mod input;
pub mod actor;

pub use input::Input;
pub use actor::{spawn_session, SessionCommand, SessionUpdate};
