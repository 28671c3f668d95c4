//! Movie recommendations from a sparse user-by-movie rating matrix.
//!
//! Movies are scored against a user with a correlation-style "hybrid" score,
//! the user's unrated movies are ranked, and a random sample of the leading
//! candidates is served over HTTP.

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
