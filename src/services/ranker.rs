use std::cmp::Ordering;
use std::collections::HashSet;

use rand::Rng;
use serde::Deserialize;

use crate::models::{MovieCatalog, MovieId, RatingMatrix, UserId};

use super::scorer::{hybrid_recommendation_score, ScoreError};

/// How unrated candidates are ordered before the top-N cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateOrder {
    /// Highest score first
    #[default]
    Ranked,
    /// Hash-set iteration order; the score order is lost
    Unordered,
}

/// Knobs for a single ranking pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingOptions {
    /// How many unrated candidates are kept before sampling
    pub top_n: usize,
    /// How many titles are drawn from the candidates
    pub sample_size: usize,
    pub candidate_order: CandidateOrder,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            top_n: 20,
            sample_size: 10,
            candidate_order: CandidateOrder::Ranked,
        }
    }
}

impl RankingOptions {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// Recommends up to `sample_size` titles the user has not rated yet
///
/// Every movie is scored against the user, unrated movies are cut to the
/// first `top_n` candidates, resolved to titles (ids missing from the catalog
/// are dropped) and a random sample is drawn without replacement.
///
/// An unknown user yields an empty list rather than an error.
pub fn hybrid_recommend_movies<R>(
    user: UserId,
    matrix: &RatingMatrix,
    catalog: &MovieCatalog,
    options: &RankingOptions,
    rng: &mut R,
) -> Result<Vec<String>, ScoreError>
where
    R: Rng + ?Sized,
{
    // Checked up front: an empty matrix scores 0.0 without looking the user up
    if !matrix.contains_user(user) {
        tracing::debug!(user_id = %user, "User not in rating matrix");
        return Ok(Vec::new());
    }

    let ranked = rank(score_all(user, matrix)?);

    let rated: HashSet<MovieId> = matrix
        .user_ratings(user)
        .map(|ratings| ratings.iter().map(|(movie, _)| *movie).collect())
        .unwrap_or_default();

    let candidates: Vec<MovieId> = match options.candidate_order {
        CandidateOrder::Ranked => ranked
            .into_iter()
            .filter(|movie| !rated.contains(movie))
            .take(options.top_n)
            .collect(),
        CandidateOrder::Unordered => {
            let all: HashSet<MovieId> = ranked.into_iter().collect();
            all.difference(&rated)
                .copied()
                .take(options.top_n)
                .collect()
        }
    };

    let titles: Vec<String> = candidates
        .iter()
        .filter_map(|movie| catalog.title(*movie))
        .map(str::to_string)
        .collect();

    tracing::debug!(
        user_id = %user,
        rated = rated.len(),
        candidates = candidates.len(),
        titled = titles.len(),
        "Ranked unrated movies"
    );

    Ok(sample_without_replacement(titles, options.sample_size, rng))
}

fn score_all(user: UserId, matrix: &RatingMatrix) -> Result<Vec<(f64, MovieId)>, ScoreError> {
    matrix
        .movies()
        .iter()
        .map(|&movie| hybrid_recommendation_score(user, movie, matrix).map(|score| (score, movie)))
        .collect()
}

/// Orders movie ids by descending score
///
/// NaN scores sort after every number. Equal scores put the higher movie id
/// first.
fn rank(mut scores: Vec<(f64, MovieId)>) -> Vec<MovieId> {
    scores.sort_by(|(a, ma), (b, mb)| descending(*a, *b).then_with(|| mb.cmp(ma)));
    scores.into_iter().map(|(_, movie)| movie).collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Draws one element at a time, uniformly, until `amount` are taken or the pool runs dry
fn sample_without_replacement<T, R>(mut pool: Vec<T>, amount: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let mut picked = Vec::with_capacity(amount.min(pool.len()));
    while picked.len() < amount && !pool.is_empty() {
        let index = rng.gen_range(0..pool.len());
        picked.push(pool.swap_remove(index));
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> MovieCatalog {
        MovieCatalog::from_movies(vec![
            Movie::new(1, "Movie A"),
            Movie::new(2, "Movie B"),
            Movie::new(3, "Movie C"),
            Movie::new(4, "Movie D"),
        ])
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn sorted(mut titles: Vec<String>) -> Vec<String> {
        titles.sort();
        titles
    }

    #[test]
    fn test_user_who_rated_everything_gets_nothing() {
        let matrix = RatingMatrix::from_rows(
            vec![1],
            vec![1, 2, 3, 4],
            vec![vec![Some(4.0), Some(3.0), Some(5.0), Some(2.0)]],
        )
        .unwrap();

        let result = hybrid_recommend_movies(
            UserId(1),
            &matrix,
            &catalog(),
            &RankingOptions::default().with_top_n(4),
            &mut rng(),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_ratings_still_count_as_rated() {
        let matrix = RatingMatrix::from_rows(
            vec![1, 2],
            vec![1, 2, 3, 4],
            vec![
                vec![Some(0.0), Some(0.0), Some(0.0), Some(0.0)],
                vec![Some(4.0), Some(3.0), Some(5.0), Some(2.0)],
            ],
        )
        .unwrap();

        let result = hybrid_recommend_movies(
            UserId(1),
            &matrix,
            &catalog(),
            &RankingOptions::default(),
            &mut rng(),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_user_without_ratings_gets_whole_pool() {
        let matrix = RatingMatrix::from_rows(
            vec![1, 2],
            vec![1, 2, 3, 4],
            vec![
                vec![Some(4.0), Some(3.0), Some(5.0), Some(2.0)],
                vec![None, None, None, None],
            ],
        )
        .unwrap();

        let result = hybrid_recommend_movies(
            UserId(2),
            &matrix,
            &catalog(),
            &RankingOptions::default().with_top_n(4),
            &mut rng(),
        )
        .unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(sorted(result), vec!["Movie A", "Movie B", "Movie C", "Movie D"]);
    }

    #[test]
    fn test_unknown_user_gets_empty_list() {
        let matrix = RatingMatrix::from_rows(
            vec![1, 2],
            vec![1, 2],
            vec![vec![Some(4.0), None], vec![Some(3.0), Some(1.0)]],
        )
        .unwrap();

        let result = hybrid_recommend_movies(
            UserId(999),
            &matrix,
            &catalog(),
            &RankingOptions::default(),
            &mut rng(),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_small_pool_returns_every_unrated_title_once() {
        let matrix = RatingMatrix::from_rows(
            vec![1, 2, 3, 4],
            vec![1, 2, 3, 4],
            vec![
                vec![Some(4.0), None, Some(3.0), None],
                vec![Some(3.0), None, Some(1.0), None],
                vec![Some(5.0), None, Some(2.0), None],
                vec![Some(2.0), None, Some(3.0), Some(4.0)],
            ],
        )
        .unwrap();

        let result = hybrid_recommend_movies(
            UserId(1),
            &matrix,
            &catalog(),
            &RankingOptions::default(),
            &mut rng(),
        )
        .unwrap();

        assert_eq!(sorted(result), vec!["Movie B", "Movie D"]);
    }

    #[test]
    fn test_empty_catalog_gives_empty_list() {
        let matrix = RatingMatrix::from_rows(
            vec![1, 2],
            vec![1, 2, 3],
            vec![
                vec![Some(4.0), None, None],
                vec![Some(3.0), Some(2.0), Some(5.0)],
            ],
        )
        .unwrap();

        let result = hybrid_recommend_movies(
            UserId(1),
            &matrix,
            &MovieCatalog::default(),
            &RankingOptions::default(),
            &mut rng(),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_uncatalogued_movies_are_dropped() {
        let matrix = RatingMatrix::from_rows(
            vec![1, 2],
            vec![1, 2, 3, 99],
            vec![
                vec![Some(4.0), None, None, None],
                vec![Some(3.0), Some(2.0), Some(5.0), Some(1.0)],
            ],
        )
        .unwrap();

        let result = hybrid_recommend_movies(
            UserId(1),
            &matrix,
            &catalog(),
            &RankingOptions::default(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(sorted(result), vec!["Movie B", "Movie C"]);
    }

    fn wide_matrix() -> (RatingMatrix, MovieCatalog) {
        // User 1 rated movie 1 only; 30 more movies rated by user 2
        let movies: Vec<u32> = (1..=31).collect();
        let user_one = movies
            .iter()
            .map(|&m| if m == 1 { Some(5.0) } else { None })
            .collect();
        let user_two = movies.iter().map(|&m| Some((m % 5) as f64)).collect();
        let matrix =
            RatingMatrix::from_rows(vec![1, 2], movies.clone(), vec![user_one, user_two]).unwrap();
        let catalog =
            MovieCatalog::from_movies(movies.iter().map(|&m| Movie::new(m, format!("Movie {}", m))));
        (matrix, catalog)
    }

    #[test]
    fn test_sample_is_capped_and_drawn_from_top_candidates() {
        let (matrix, catalog) = wide_matrix();
        let options = RankingOptions::default();

        let result =
            hybrid_recommend_movies(UserId(1), &matrix, &catalog, &options, &mut rng()).unwrap();

        assert_eq!(result.len(), 10);
        let distinct: HashSet<&String> = result.iter().collect();
        assert_eq!(distinct.len(), 10);

        // Every score is 0.0 for user 1, so ties put the highest ids first
        let pool: HashSet<String> = (12..=31).map(|m| format!("Movie {}", m)).collect();
        assert!(result.iter().all(|title| pool.contains(title)));
        assert!(!result.contains(&"Movie 1".to_string()));
    }

    #[test]
    fn test_unordered_candidates_stay_within_unrated_pool() {
        let (matrix, catalog) = wide_matrix();
        let options = RankingOptions {
            candidate_order: CandidateOrder::Unordered,
            ..RankingOptions::default()
        };

        let result =
            hybrid_recommend_movies(UserId(1), &matrix, &catalog, &options, &mut rng()).unwrap();

        assert_eq!(result.len(), 10);
        let distinct: HashSet<&String> = result.iter().collect();
        assert_eq!(distinct.len(), 10);

        let unrated: HashSet<String> = (2..=31).map(|m| format!("Movie {}", m)).collect();
        assert!(result.iter().all(|title| unrated.contains(title)));
    }

    #[test]
    fn test_unknown_user_gets_empty_list_without_user_rows() {
        let matrix = RatingMatrix::from_rows(Vec::new(), vec![1, 2], Vec::new()).unwrap();

        let result = hybrid_recommend_movies(
            UserId(999),
            &matrix,
            &catalog(),
            &RankingOptions::default(),
            &mut rng(),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_repeated_calls_stay_valid() {
        let (matrix, catalog) = wide_matrix();
        let options = RankingOptions::default();
        let mut rng = rng();

        let first =
            hybrid_recommend_movies(UserId(1), &matrix, &catalog, &options, &mut rng).unwrap();
        let second =
            hybrid_recommend_movies(UserId(1), &matrix, &catalog, &options, &mut rng).unwrap();

        for result in [first, second] {
            assert!(result.len() <= 10);
            assert!(!result.contains(&"Movie 1".to_string()));
        }
    }

    #[test]
    fn test_rank_orders_by_score_then_id() {
        let ranked = rank(vec![
            (0.5, MovieId(1)),
            (f64::NAN, MovieId(2)),
            (0.9, MovieId(3)),
            (0.5, MovieId(4)),
            (-1.0, MovieId(5)),
        ]);

        assert_eq!(
            ranked,
            vec![MovieId(3), MovieId(4), MovieId(1), MovieId(5), MovieId(2)]
        );
    }

    #[test]
    fn test_sampling_stops_when_pool_is_exhausted() {
        let picked = sample_without_replacement(vec![1, 2, 3], 10, &mut rng());
        assert_eq!(picked.len(), 3);

        let picked: Vec<i32> = sample_without_replacement(Vec::new(), 10, &mut rng());
        assert!(picked.is_empty());
    }
}
