use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use hybrid_recommender::api::{create_router, AppState};
use hybrid_recommender::config::Config;
use hybrid_recommender::data::load_dataset;
use hybrid_recommender::services::{HybridRecommender, Recommender};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hybrid_recommender=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let dataset = Arc::new(load_dataset(&config.ratings_path, &config.movies_path)?);

    // One seed drives both sources so a seeded run is reproducible end to end
    let (ranking_rng, user_id_rng) = match config.rng_seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };

    let recommender: Arc<dyn Recommender> = Arc::new(HybridRecommender::with_rng(
        dataset,
        config.ranking_options(),
        ranking_rng,
    ));
    let state = AppState::with_rng(recommender, config.user_id_max, user_id_rng);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
