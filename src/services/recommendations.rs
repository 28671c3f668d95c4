use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::models::{Dataset, UserId};

use super::ranker::{hybrid_recommend_movies, RankingOptions};
use super::scorer::ScoreError;

/// Failures surfaced by a recommender
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Produces movie recommendations for a user
///
/// The HTTP layer only depends on this trait, so the scoring backend can be
/// swapped (or mocked in tests).
pub trait Recommender: Send + Sync {
    /// Returns the recommended titles for `user_id`
    ///
    /// An unknown user is not an error: the list is simply empty.
    fn recommend_for(&self, user_id: UserId) -> Result<Vec<String>, RecommendError>;
}

/// Recommender backed by the hybrid correlation score
pub struct HybridRecommender {
    dataset: Arc<Dataset>,
    options: RankingOptions,
    rng: Mutex<StdRng>,
}

impl HybridRecommender {
    /// Creates a recommender drawing from an entropy-seeded random source
    pub fn new(dataset: Arc<Dataset>, options: RankingOptions) -> Self {
        Self::with_rng(dataset, options, StdRng::from_entropy())
    }

    /// Creates a recommender with an explicit random source
    pub fn with_rng(dataset: Arc<Dataset>, options: RankingOptions, rng: StdRng) -> Self {
        Self {
            dataset,
            options,
            rng: Mutex::new(rng),
        }
    }
}

impl Recommender for HybridRecommender {
    #[tracing::instrument(skip(self), fields(top_n = self.options.top_n))]
    fn recommend_for(&self, user_id: UserId) -> Result<Vec<String>, RecommendError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| RecommendError::Internal(format!("random source poisoned: {}", e)))?;

        let titles = hybrid_recommend_movies(
            user_id,
            &self.dataset.matrix,
            &self.dataset.catalog,
            &self.options,
            &mut *rng,
        )?;

        tracing::debug!(count = titles.len(), "Recommendations ready");
        Ok(titles)
    }
}
