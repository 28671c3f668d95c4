pub mod loader;

pub use loader::{load_dataset, load_movies, load_ratings, read_movies, read_ratings, DataError};
