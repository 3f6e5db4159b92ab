//! Movie catalog: storage, attribute indexes, and random draws.
//!
//! The engine only talks to the [`Catalog`] trait. [`MovieCatalog`] is the
//! in-memory implementation, with one index per `ConnectionType` and a
//! case-insensitive title index.

use rustc_hash::{FxHashMap, FxHashSet};
use std::io::Read;
use strum::IntoEnumIterator;
use tracing::debug;

use super::movie::{ConnectionType, Movie, MovieId};
use crate::core::{CatalogLoadError, GameError, GameRng};

/// Read-mostly movie lookup service consumed by the engine.
///
/// `random_movie` hands out each movie at most once per game; every other
/// query is pure.
pub trait Catalog {
    /// Look up a movie by id.
    fn get(&self, id: MovieId) -> Option<&Movie>;

    /// Resolve a title, ignoring case and surrounding whitespace.
    fn movie_by_title(&self, title: &str) -> Option<&Movie>;

    /// Ids of every movie carrying `value` for `connection`. Empty when none do.
    fn movies_with(&self, connection: ConnectionType, value: &str) -> &[MovieId];

    /// Any movie, uniformly, without marking it used.
    fn sample(&self, rng: &mut GameRng) -> Option<&Movie>;

    /// Draw a movie that has not been handed out or played yet and mark it used.
    fn random_movie(&mut self, rng: &mut GameRng) -> Result<Movie, GameError>;

    /// Record that a movie entered play by some other route.
    fn mark_used(&mut self, id: MovieId);

    /// Every title, for building a [`Suggester`](super::Suggester).
    fn titles(&self) -> Vec<&str>;

    /// Number of movies carrying `value` for `connection`.
    fn count_with(&self, connection: ConnectionType, value: &str) -> usize {
        self.movies_with(connection, value).len()
    }

    fn by_genre(&self, genre: &str) -> &[MovieId] {
        self.movies_with(ConnectionType::Genre, genre)
    }

    fn by_actor(&self, actor: &str) -> &[MovieId] {
        self.movies_with(ConnectionType::Actor, actor)
    }

    fn by_director(&self, director: &str) -> &[MovieId] {
        self.movies_with(ConnectionType::Director, director)
    }

    fn by_writer(&self, writer: &str) -> &[MovieId] {
        self.movies_with(ConnectionType::Writer, writer)
    }

    fn by_cinematographer(&self, cinematographer: &str) -> &[MovieId] {
        self.movies_with(ConnectionType::Cinematographer, cinematographer)
    }

    fn by_composer(&self, composer: &str) -> &[MovieId] {
        self.movies_with(ConnectionType::Composer, composer)
    }
}

/// In-memory catalog.
///
/// ## Example
///
/// ```
/// use movie_chain::movies::{Catalog, Movie, MovieCatalog, MovieId};
///
/// let catalog = MovieCatalog::from_movies([
///     Movie::new(MovieId::new(1), "Heat", 1995).with_actors(["Al Pacino"]),
///     Movie::new(MovieId::new(2), "Serpico", 1973).with_actors(["Al Pacino"]),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.by_actor("Al Pacino").len(), 2);
/// assert_eq!(catalog.movie_by_title("  heat ").unwrap().id, MovieId::new(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MovieCatalog {
    movies: FxHashMap<MovieId, Movie>,
    /// Insertion order, so seeded draws are reproducible.
    order: Vec<MovieId>,
    indexes: FxHashMap<ConnectionType, FxHashMap<String, Vec<MovieId>>>,
    titles: FxHashMap<String, MovieId>,
    used: FxHashSet<MovieId>,
}

impl MovieCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from movies, rejecting duplicate ids.
    pub fn from_movies(movies: impl IntoIterator<Item = Movie>) -> Result<Self, CatalogLoadError> {
        let mut catalog = Self::new();
        for movie in movies {
            catalog.insert(movie)?;
        }
        Ok(catalog)
    }

    /// Build a catalog from a JSON array of movies.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogLoadError> {
        let movies: Vec<Movie> = serde_json::from_str(json)?;
        Self::from_movies(movies)
    }

    /// Build a catalog from a reader yielding a JSON array of movies.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, CatalogLoadError> {
        let movies: Vec<Movie> = serde_json::from_reader(reader)?;
        Self::from_movies(movies)
    }

    /// Add a movie and index it.
    pub fn insert(&mut self, movie: Movie) -> Result<(), CatalogLoadError> {
        if self.movies.contains_key(&movie.id) {
            return Err(CatalogLoadError::DuplicateId(movie.id));
        }
        let movie = movie.normalized();

        for connection in ConnectionType::iter() {
            let index = self.indexes.entry(connection).or_default();
            for value in movie.connections(connection) {
                let ids = index.entry(value.clone()).or_default();
                if !ids.contains(&movie.id) {
                    ids.push(movie.id);
                }
            }
        }
        self.titles.insert(title_key(&movie.title), movie.id);
        self.order.push(movie.id);
        self.movies.insert(movie.id, movie);
        Ok(())
    }

    /// Get the number of movies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Number of movies not yet handed out or played.
    #[must_use]
    pub fn unused_count(&self) -> usize {
        self.movies.len() - self.used.len()
    }

    /// Check if a movie has been handed out or played.
    #[must_use]
    pub fn is_used(&self, id: MovieId) -> bool {
        self.used.contains(&id)
    }

    /// Iterate over movies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.order.iter().filter_map(|id| self.movies.get(id))
    }

}

impl Catalog for MovieCatalog {
    fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    fn movie_by_title(&self, title: &str) -> Option<&Movie> {
        self.titles
            .get(&title_key(title))
            .and_then(|id| self.movies.get(id))
    }

    fn movies_with(&self, connection: ConnectionType, value: &str) -> &[MovieId] {
        self.indexes
            .get(&connection)
            .and_then(|index| index.get(value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn sample(&self, rng: &mut GameRng) -> Option<&Movie> {
        rng.choose(&self.order).and_then(|id| self.movies.get(id))
    }

    fn random_movie(&mut self, rng: &mut GameRng) -> Result<Movie, GameError> {
        let unused: Vec<MovieId> = self
            .order
            .iter()
            .copied()
            .filter(|id| !self.used.contains(id))
            .collect();

        let id = *rng.choose(&unused).ok_or(GameError::CatalogExhausted)?;
        self.used.insert(id);
        debug!(movie = %id, remaining = unused.len() - 1, "Drew random movie");

        self.movies
            .get(&id)
            .cloned()
            .ok_or(GameError::CatalogExhausted)
    }

    fn mark_used(&mut self, id: MovieId) {
        if self.movies.contains_key(&id) {
            self.used.insert(id);
        }
    }

    fn titles(&self) -> Vec<&str> {
        self.iter().map(|m| m.title.as_str()).collect()
    }
}

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> MovieCatalog {
        MovieCatalog::from_movies([
            Movie::new(MovieId::new(1), "Heat", 1995)
                .with_director("Michael Mann")
                .with_actors(["Al Pacino", "Robert De Niro"])
                .with_genres(["Crime", "Drama"]),
            Movie::new(MovieId::new(2), "The Insider", 1999)
                .with_director("Michael Mann")
                .with_actors(["Al Pacino", "Russell Crowe"])
                .with_genres(["Drama"]),
            Movie::new(MovieId::new(3), "Ronin", 1998)
                .with_director("John Frankenheimer")
                .with_actors(["Robert De Niro"])
                .with_composer("Elia Cmiral")
                .with_genres(["Action"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_indexes() {
        let catalog = sample_catalog();

        assert_eq!(catalog.by_director("Michael Mann"), &[MovieId::new(1), MovieId::new(2)]);
        assert_eq!(catalog.by_actor("Robert De Niro"), &[MovieId::new(1), MovieId::new(3)]);
        assert_eq!(catalog.by_composer("Elia Cmiral"), &[MovieId::new(3)]);
        assert_eq!(catalog.count_with(ConnectionType::Genre, "Drama"), 2);
        assert!(catalog.by_writer("Nobody").is_empty());
        assert!(catalog.by_cinematographer("Nobody").is_empty());
    }

    #[test]
    fn test_title_lookup_ignores_case_and_whitespace() {
        let catalog = sample_catalog();

        assert_eq!(catalog.movie_by_title("the insider").unwrap().id, MovieId::new(2));
        assert_eq!(catalog.movie_by_title(" RONIN ").unwrap().id, MovieId::new(3));
        assert!(catalog.movie_by_title("Collateral").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = sample_catalog();
        let err = catalog
            .insert(Movie::new(MovieId::new(1), "Heat Again", 2000))
            .unwrap_err();

        assert!(matches!(err, CatalogLoadError::DuplicateId(id) if id == MovieId::new(1)));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_random_movie_never_repeats_then_exhausts() {
        let mut catalog = sample_catalog();
        let mut rng = GameRng::new(42);

        let mut seen = FxHashSet::default();
        for _ in 0..3 {
            let movie = catalog.random_movie(&mut rng).unwrap();
            assert!(seen.insert(movie.id));
        }

        assert_eq!(catalog.unused_count(), 0);
        assert_eq!(catalog.random_movie(&mut rng), Err(GameError::CatalogExhausted));
    }

    #[test]
    fn test_mark_used_excludes_from_draws() {
        let mut catalog = sample_catalog();
        catalog.mark_used(MovieId::new(1));
        catalog.mark_used(MovieId::new(2));
        catalog.mark_used(MovieId::new(99));

        let mut rng = GameRng::new(1);
        assert_eq!(catalog.random_movie(&mut rng).unwrap().id, MovieId::new(3));
        assert_eq!(catalog.unused_count(), 0);
    }

    #[test]
    fn test_sample_does_not_consume() {
        let catalog = sample_catalog();
        let mut rng = GameRng::new(3);

        for _ in 0..10 {
            assert!(catalog.sample(&mut rng).is_some());
        }
        assert_eq!(catalog.unused_count(), 3);
    }

    #[test]
    fn test_from_json_normalizes_blank_director() {
        let json = r#"[
            { "id": 1, "title": "Heat", "director": "", "genres": ["Crime"] },
            { "id": 2, "title": "Ronin", "director": "John Frankenheimer" }
        ]"#;
        let catalog = MovieCatalog::from_json_str(json).unwrap();

        assert!(catalog.get(MovieId::new(1)).unwrap().director.is_none());
        assert!(catalog.by_director("").is_empty());
        assert_eq!(catalog.by_genre("Crime"), &[MovieId::new(1)]);
        assert_eq!(catalog.titles(), vec!["Heat", "Ronin"]);
    }

    #[test]
    fn test_from_json_reader() {
        let json = br#"[{ "id": 5, "title": "Up" }]"#;
        let catalog = MovieCatalog::from_json_reader(&json[..]).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
