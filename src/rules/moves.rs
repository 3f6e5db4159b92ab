//! Moves: one player connecting the current movie to a new one.
//!
//! A `Move` is built by the engine, validated, and then appended to the
//! move history. Its fields have no setters, so a recorded connection can
//! never be rewritten after the fact.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::PlayerId;
use crate::movies::{ConnectionType, Movie};

/// A proposed or applied connection from the current movie to `movie`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    player: PlayerId,
    movie: Movie,
    connection: ConnectionType,
    value: String,
    /// Milliseconds since the Unix epoch at construction.
    created_at_ms: u64,
}

impl Move {
    #[must_use]
    pub fn new(
        player: PlayerId,
        movie: Movie,
        connection: ConnectionType,
        value: impl Into<String>,
    ) -> Self {
        let created_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            player,
            movie,
            connection,
            value: value.into(),
            created_at_ms,
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    #[must_use]
    pub fn connection(&self) -> ConnectionType {
        self.connection
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn created_at_ms(&self) -> u64 {
        self.created_at_ms
    }

    /// Check whether this move links via exactly `connection`/`value`.
    #[must_use]
    pub fn uses(&self, connection: ConnectionType, value: &str) -> bool {
        self.connection == connection && self.value == value
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} plays {} via {} ({})",
            self.player, self.movie.title, self.connection, self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::MovieId;

    #[test]
    fn test_move_accessors() {
        let movie = Movie::new(MovieId::new(4), "Titanic", 1997).with_actors(["Leonardo DiCaprio"]);
        let mv = Move::new(PlayerId::new(1), movie.clone(), ConnectionType::Actor, "Leonardo DiCaprio");

        assert_eq!(mv.player(), PlayerId::new(1));
        assert_eq!(mv.movie(), &movie);
        assert_eq!(mv.connection(), ConnectionType::Actor);
        assert_eq!(mv.value(), "Leonardo DiCaprio");
        assert!(mv.created_at_ms() > 0);
        assert!(mv.uses(ConnectionType::Actor, "Leonardo DiCaprio"));
        assert!(!mv.uses(ConnectionType::Writer, "Leonardo DiCaprio"));
    }

    #[test]
    fn test_move_display() {
        let movie = Movie::new(MovieId::new(4), "Titanic", 1997);
        let mv = Move::new(PlayerId::new(0), movie, ConnectionType::Actor, "Kate Winslet");

        assert_eq!(mv.to_string(), "Seat 0 plays Titanic via actor (Kate Winslet)");
    }
}
