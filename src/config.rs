use serde::Deserialize;

use crate::services::{CandidateOrder, RankingOptions};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// MovieLens ratings table (`userId,movieId,rating,timestamp`)
    #[serde(default = "default_ratings_path")]
    pub ratings_path: String,

    /// MovieLens movies table (`movieId,title,genres`)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Unrated candidates kept before sampling
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Titles returned per recommendation
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Upper bound (inclusive) of the randomly drawn user id
    #[serde(default = "default_user_id_max")]
    pub user_id_max: u32,

    #[serde(default)]
    pub candidate_order: CandidateOrder,

    /// Seed for every random source; entropy when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_ratings_path() -> String {
    "ml-latest-small/ratings.csv".to_string()
}

fn default_movies_path() -> String {
    "ml-latest-small/movies.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_top_n() -> usize {
    20
}

fn default_sample_size() -> usize {
    10
}

fn default_user_id_max() -> u32 {
    1000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.user_id_max == 0 {
            anyhow::bail!("Failed to load config: USER_ID_MAX must be at least 1");
        }

        Ok(config)
    }

    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            top_n: self.top_n,
            sample_size: self.sample_size,
            candidate_order: self.candidate_order,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
