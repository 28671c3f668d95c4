use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::models::{Dataset, MatrixError, Movie, MovieCatalog, Rating, RatingMatrix};

/// Errors raised while ingesting the ratings and movies tables
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid rating matrix: {0}")]
    Matrix(#[from] MatrixError),
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Parses a `userId,movieId,rating[,...]` table
///
/// A rating cell that is not a number fails the whole read.
pub fn read_ratings<R: Read>(input: R) -> Result<Vec<Rating>, DataError> {
    let ratings = reader(input)
        .deserialize()
        .collect::<Result<Vec<Rating>, csv::Error>>()?;
    Ok(ratings)
}

/// Parses a `movieId,title[,...]` table
pub fn read_movies<R: Read>(input: R) -> Result<Vec<Movie>, DataError> {
    let movies = reader(input)
        .deserialize()
        .collect::<Result<Vec<Movie>, csv::Error>>()?;
    Ok(movies)
}

/// Loads the ratings file and pivots it into a matrix
pub fn load_ratings(path: impl AsRef<Path>) -> Result<RatingMatrix, DataError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let ratings = read_ratings(file)?;
    let matrix = RatingMatrix::from_ratings(ratings)?;

    tracing::info!(
        path = %path.display(),
        users = matrix.users().len(),
        movies = matrix.movies().len(),
        ratings = matrix.num_ratings(),
        "Loaded rating matrix"
    );

    Ok(matrix)
}

/// Loads the movie catalog file
pub fn load_movies(path: impl AsRef<Path>) -> Result<MovieCatalog, DataError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let catalog = MovieCatalog::from_movies(read_movies(file)?);

    tracing::info!(path = %path.display(), movies = catalog.len(), "Loaded movie catalog");

    Ok(catalog)
}

/// Loads both tables
pub fn load_dataset(
    ratings_path: impl AsRef<Path>,
    movies_path: impl AsRef<Path>,
) -> Result<Dataset, DataError> {
    Ok(Dataset {
        matrix: load_ratings(ratings_path)?,
        catalog: load_movies(movies_path)?,
    })
}
