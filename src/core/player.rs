//! Player identification, per-player data storage, and the `Player` record.
//!
//! ## PlayerId
//!
//! Seat index into the player list, 0-based and cyclic over the player count.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::rules::WinCondition;

/// Seat identifier supporting 1-255 players.
///
/// Seat indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that acts after this one.
    ///
    /// ```
    /// use movie_chain::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use movie_chain::core::{PlayerId, PlayerMap};
///
/// let mut score: PlayerMap<u32> = PlayerMap::new(2, |_| 0);
/// score[PlayerId::new(1)] += 3;
/// assert_eq!(score[PlayerId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Take ownership of one value per seat, in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Check whether `player` is a seat in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A participant: display name, score, and a private win condition.
///
/// Score and win-condition progress only move together, through
/// [`Player::record_win_progress`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    score: u32,
    win_condition: WinCondition,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, win_condition: WinCondition) -> Self {
        Self {
            name: name.into(),
            score: 0,
            win_condition,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn win_condition(&self) -> &WinCondition {
        &self.win_condition
    }

    /// Credit an accepted move that matched this player's own condition.
    pub fn record_win_progress(&mut self) {
        self.score += 1;
        self.win_condition.record_progress();
    }
}
