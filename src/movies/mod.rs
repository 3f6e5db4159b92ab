//! Movies, the catalog that serves them, and title suggestions.
//!
//! The engine treats the catalog as a collaborator: it reads movies and
//! draws random ones, but never builds indexes itself.

pub mod movie;
pub mod catalog;
pub mod suggest;

pub use movie::{ConnectionType, Movie, MovieId};
pub use catalog::{Catalog, MovieCatalog};
pub use suggest::Suggester;
