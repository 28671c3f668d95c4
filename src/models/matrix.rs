use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Deserialize;
use thiserror::Error;

use super::{MovieId, UserId};

/// Errors raised while building a rating matrix
#[derive(Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("duplicate rating for user {user} and movie {movie}")]
    DuplicateEntry { user: UserId, movie: MovieId },

    #[error("duplicate axis label: {0}")]
    DuplicateLabel(String),

    #[error("shape mismatch: expected {expected} values, got {actual}")]
    Shape { expected: usize, actual: usize },
}

/// One row of the ratings table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rating {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub rating: f64,
}

impl Rating {
    pub fn new(user_id: u32, movie_id: u32, rating: f64) -> Self {
        Self {
            user_id: UserId(user_id),
            movie_id: MovieId(movie_id),
            rating,
        }
    }
}

/// Sparse user-by-movie rating table
///
/// Only rated cells are stored, once per axis: `rows[i]` holds the ratings of
/// `users[i]` ordered by movie, `columns[j]` holds the ratings of `movies[j]`
/// ordered by user. A missing cell means "not rated", which is distinct from a
/// rating of zero.
#[derive(Debug, Clone, Default)]
pub struct RatingMatrix {
    users: Vec<UserId>,
    movies: Vec<MovieId>,
    user_index: HashMap<UserId, usize>,
    movie_index: HashMap<MovieId, usize>,
    rows: Vec<Vec<(MovieId, f64)>>,
    columns: Vec<Vec<(UserId, f64)>>,
}

impl RatingMatrix {
    /// Pivots rating triples into a matrix
    ///
    /// Users and movies are ordered by ascending id. NaN ratings count as
    /// missing. Rating the same movie twice is an error.
    pub fn from_ratings<I>(ratings: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = Rating>,
    {
        let mut cells: BTreeMap<UserId, BTreeMap<MovieId, f64>> = BTreeMap::new();
        let mut movies: BTreeSet<MovieId> = BTreeSet::new();

        for Rating {
            user_id,
            movie_id,
            rating,
        } in ratings
        {
            movies.insert(movie_id);
            let row = cells.entry(user_id).or_default();
            if row.insert(movie_id, rating).is_some() {
                return Err(MatrixError::DuplicateEntry {
                    user: user_id,
                    movie: movie_id,
                });
            }
        }

        let users: Vec<UserId> = cells.keys().copied().collect();
        let movies: Vec<MovieId> = movies.into_iter().collect();
        let rows = cells
            .into_values()
            .map(|row| row.into_iter().map(|(movie, rating)| (movie, Some(rating))).collect())
            .collect::<Vec<Vec<_>>>();

        Ok(Self::assemble(users, movies, rows))
    }

    /// Builds a matrix from a dense table, one `Option` per cell
    ///
    /// `rows[i][j]` is the rating of `users[i]` for `movies[j]`, `None` when
    /// unrated. Axis order is kept as given.
    pub fn from_rows(
        users: Vec<u32>,
        movies: Vec<u32>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, MatrixError> {
        if rows.len() != users.len() {
            return Err(MatrixError::Shape {
                expected: users.len(),
                actual: rows.len(),
            });
        }

        let users: Vec<UserId> = users.into_iter().map(UserId).collect();
        let movies: Vec<MovieId> = movies.into_iter().map(MovieId).collect();
        check_unique(&users, "user")?;
        check_unique(&movies, "movie")?;

        let mut sparse = Vec::with_capacity(rows.len());
        for row in rows {
            if row.len() != movies.len() {
                return Err(MatrixError::Shape {
                    expected: movies.len(),
                    actual: row.len(),
                });
            }
            sparse.push(movies.iter().copied().zip(row).collect());
        }

        Ok(Self::assemble(users, movies, sparse))
    }

    fn assemble(
        users: Vec<UserId>,
        movies: Vec<MovieId>,
        cells: Vec<Vec<(MovieId, Option<f64>)>>,
    ) -> Self {
        let user_index: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let movie_index: HashMap<MovieId, usize> =
            movies.iter().enumerate().map(|(j, id)| (*id, j)).collect();

        let mut rows: Vec<Vec<(MovieId, f64)>> = vec![Vec::new(); users.len()];
        let mut columns: Vec<Vec<(UserId, f64)>> = vec![Vec::new(); movies.len()];

        for (i, row) in cells.into_iter().enumerate() {
            for (movie, rating) in row {
                let Some(rating) = rating.filter(|r| !r.is_nan()) else {
                    continue;
                };
                rows[i].push((movie, rating));
                columns[movie_index[&movie]].push((users[i], rating));
            }
        }

        Self {
            users,
            movies,
            user_index,
            movie_index,
            rows,
            columns,
        }
    }

    /// Row labels, in matrix order
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Column labels, in matrix order
    pub fn movies(&self) -> &[MovieId] {
        &self.movies
    }

    /// The user's rated cells as `(movie, rating)`, `None` for an unknown user
    pub fn user_ratings(&self, user: UserId) -> Option<&[(MovieId, f64)]> {
        self.user_index.get(&user).map(|&i| self.rows[i].as_slice())
    }

    /// The movie's rated cells as `(user, rating)`, `None` for an unknown movie
    pub fn movie_ratings(&self, movie: MovieId) -> Option<&[(UserId, f64)]> {
        self.movie_index.get(&movie).map(|&j| self.columns[j].as_slice())
    }

    pub fn contains_user(&self, user: UserId) -> bool {
        self.user_index.contains_key(&user)
    }

    /// True when the matrix has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() || self.movies.is_empty()
    }

    /// Number of rated cells
    pub fn num_ratings(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

fn check_unique<T>(labels: &[T], axis: &str) -> Result<(), MatrixError>
where
    T: Copy + Eq + std::hash::Hash + std::fmt::Display,
{
    let mut seen = std::collections::HashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(*label) {
            return Err(MatrixError::DuplicateLabel(format!("{} {}", axis, label)));
        }
    }
    Ok(())
}
