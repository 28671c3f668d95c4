use serde::{Deserialize, Serialize};
use std::fmt::Display;

mod catalog;
mod matrix;

pub use catalog::{Movie, MovieCatalog};
pub use matrix::{MatrixError, Rating, RatingMatrix};

/// Identifier of a user (a row of the rating matrix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

/// Identifier of a movie (a column of the rating matrix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u32);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a recommendation needs, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct Dataset {
    pub matrix: RatingMatrix,
    pub catalog: MovieCatalog,
}
