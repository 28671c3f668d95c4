use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::MovieId;

/// One row of the movie catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(movie_id: u32, title: impl Into<String>) -> Self {
        Self {
            movie_id: MovieId(movie_id),
            title: title.into(),
        }
    }
}

/// Movie id to title lookup
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    titles: HashMap<MovieId, String>,
}

impl MovieCatalog {
    /// Builds the catalog; when an id appears more than once the first title wins
    pub fn from_movies<I>(movies: I) -> Self
    where
        I: IntoIterator<Item = Movie>,
    {
        let mut titles = HashMap::new();
        for movie in movies {
            titles.entry(movie.movie_id).or_insert(movie.title);
        }
        Self { titles }
    }

    pub fn title(&self, movie: MovieId) -> Option<&str> {
        self.titles.get(&movie).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
