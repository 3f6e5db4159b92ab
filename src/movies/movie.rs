//! Movie records and the attributes that connect them.
//!
//! A `Movie` is immutable once it enters the catalog. The engine only asks
//! two questions of it: which values does it carry for a connection type,
//! and does it carry a particular value.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Stable, unique movie identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovieId(pub u32);

impl MovieId {
    /// Create a new movie ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Movie({})", self.0)
    }
}

/// Attribute kinds two movies can share.
///
/// Declaration order is the search order used when looking for a
/// connecting attribute, so reordering variants changes which connection
/// a move is credited with.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConnectionType {
    Genre,
    Actor,
    Director,
    Writer,
    Cinematographer,
    Composer,
}

impl ConnectionType {
    /// Every type except `Genre`, in declaration order.
    pub const PEOPLE: [ConnectionType; 5] = [
        ConnectionType::Actor,
        ConnectionType::Director,
        ConnectionType::Writer,
        ConnectionType::Cinematographer,
        ConnectionType::Composer,
    ];
}

/// A catalog movie.
///
/// ## Example
///
/// ```
/// use movie_chain::movies::{ConnectionType, Movie, MovieId};
///
/// let heat = Movie::new(MovieId::new(1), "Heat", 1995)
///     .with_director("Michael Mann")
///     .with_actors(["Al Pacino", "Robert De Niro"])
///     .with_genres(["Crime"]);
///
/// assert!(heat.has_connection(ConnectionType::Actor, "Al Pacino"));
/// assert_eq!(heat.connections(ConnectionType::Director), ["Michael Mann"]);
/// assert!(heat.connections(ConnectionType::Composer).is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub release_year: u16,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub composer: Option<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub writers: Vec<String>,
    #[serde(default)]
    pub cinematographers: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Movie {
    /// Create a movie with no connections.
    #[must_use]
    pub fn new(id: MovieId, title: impl Into<String>, release_year: u16) -> Self {
        Self {
            id,
            title: title.into(),
            release_year,
            director: None,
            composer: None,
            actors: Vec::new(),
            writers: Vec::new(),
            cinematographers: Vec::new(),
            genres: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self.normalized()
    }

    #[must_use]
    pub fn with_composer(mut self, composer: impl Into<String>) -> Self {
        self.composer = Some(composer.into());
        self.normalized()
    }

    #[must_use]
    pub fn with_actors<I: IntoIterator<Item = S>, S: Into<String>>(mut self, actors: I) -> Self {
        self.actors.extend(actors.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_writers<I: IntoIterator<Item = S>, S: Into<String>>(mut self, writers: I) -> Self {
        self.writers.extend(writers.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_cinematographers<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        cinematographers: I,
    ) -> Self {
        self.cinematographers
            .extend(cinematographers.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_genres<I: IntoIterator<Item = S>, S: Into<String>>(mut self, genres: I) -> Self {
        self.genres.extend(genres.into_iter().map(Into::into));
        self
    }

    /// Values this movie carries for `connection`, in stored order.
    #[must_use]
    pub fn connections(&self, connection: ConnectionType) -> &[String] {
        match connection {
            ConnectionType::Genre => &self.genres,
            ConnectionType::Actor => &self.actors,
            ConnectionType::Director => self.director.as_slice(),
            ConnectionType::Writer => &self.writers,
            ConnectionType::Cinematographer => &self.cinematographers,
            ConnectionType::Composer => self.composer.as_slice(),
        }
    }

    /// Check whether this movie carries `value` for `connection`.
    #[must_use]
    pub fn has_connection(&self, connection: ConnectionType, value: &str) -> bool {
        self.connections(connection).iter().any(|v| v == value)
    }

    /// Drop empty single-valued attributes and blank list entries.
    pub(crate) fn normalized(mut self) -> Self {
        self.director = self.director.filter(|d| !d.trim().is_empty());
        self.composer = self.composer.filter(|c| !c.trim().is_empty());
        for list in [
            &mut self.actors,
            &mut self.writers,
            &mut self.cinematographers,
            &mut self.genres,
        ] {
            list.retain(|v| !v.trim().is_empty());
        }
        self
    }
}
