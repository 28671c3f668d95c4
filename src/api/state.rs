use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::models::UserId;
use crate::services::Recommender;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<dyn Recommender>,
    /// Random source for the user ids drawn per request
    pub user_ids: Arc<Mutex<StdRng>>,
    pub user_id_max: u32,
}

impl AppState {
    /// Creates state whose user ids come from an entropy-seeded source
    pub fn new(recommender: Arc<dyn Recommender>, user_id_max: u32) -> Self {
        Self::with_rng(recommender, user_id_max, StdRng::from_entropy())
    }

    pub fn with_rng(recommender: Arc<dyn Recommender>, user_id_max: u32, rng: StdRng) -> Self {
        Self {
            recommender,
            user_ids: Arc::new(Mutex::new(rng)),
            user_id_max: user_id_max.max(1),
        }
    }

    /// Draws a user id uniformly from `1..=user_id_max`
    pub async fn draw_user_id(&self) -> UserId {
        let mut rng = self.user_ids.lock().await;
        UserId(rng.gen_range(1..=self.user_id_max))
    }
}
