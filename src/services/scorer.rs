use std::collections::HashMap;

use thiserror::Error;

use crate::models::{MovieId, RatingMatrix, UserId};

/// Lookup failures raised by the scorer
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoreError {
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    #[error("unknown movie: {0}")]
    UnknownMovie(MovieId),
}

/// Correlation-style similarity between a user's ratings and a movie's ratings
///
/// The comparison is restricted to the identifiers present in both series:
/// the ids of the movies the user rated are matched against the ids of the
/// users who rated the movie. The two axes are matched by raw numeric value.
///
/// Means are taken over each full series, while the sums run over the shared
/// identifiers only, so the result is not clamped to `[-1, 1]`. Returns
/// exactly `0.0` when nothing is shared (or the matrix is empty). Zero
/// variance on the shared identifiers gives `0.0 / 0.0`, i.e. `NaN`.
pub fn hybrid_recommendation_score(
    user: UserId,
    movie: MovieId,
    matrix: &RatingMatrix,
) -> Result<f64, ScoreError> {
    if matrix.is_empty() {
        return Ok(0.0);
    }

    let user_ratings = matrix
        .user_ratings(user)
        .ok_or(ScoreError::UnknownUser(user))?;
    let movie_ratings = matrix
        .movie_ratings(movie)
        .ok_or(ScoreError::UnknownMovie(movie))?;

    let by_rater: HashMap<u32, f64> = movie_ratings
        .iter()
        .map(|(rater, rating)| (rater.0, *rating))
        .collect();

    // (user's rating, movie's rating) for every shared identifier, in the
    // user's column order
    let common: Vec<(f64, f64)> = user_ratings
        .iter()
        .filter_map(|(rated, user_rating)| {
            by_rater
                .get(&rated.0)
                .map(|movie_rating| (*user_rating, *movie_rating))
        })
        .collect();

    if common.is_empty() {
        return Ok(0.0);
    }

    let mean_user = mean(user_ratings.iter().map(|(_, r)| *r));
    let mean_movie = mean(movie_ratings.iter().map(|(_, r)| *r));

    let mut numerator = 0.0;
    let mut user_squares = 0.0;
    let mut movie_squares = 0.0;
    for (user_rating, movie_rating) in common {
        let du = user_rating - mean_user;
        let dm = movie_rating - mean_movie;
        numerator += du * dm;
        user_squares += du * du;
        movie_squares += dm * dm;
    }

    Ok(numerator / (user_squares.sqrt() * movie_squares.sqrt()))
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len() as f64;
    values.sum::<f64>() / n
}
