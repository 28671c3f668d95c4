pub mod ranker;
pub mod recommendations;
pub mod scorer;

pub use ranker::{hybrid_recommend_movies, CandidateOrder, RankingOptions};
pub use recommendations::{HybridRecommender, RecommendError, Recommender};
pub use scorer::{hybrid_recommendation_score, ScoreError};
