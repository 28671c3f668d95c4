use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::UserId;

use super::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub user_id: UserId,
    pub recommendations: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommends movies for a randomly drawn user
///
/// Query parameters are ignored. Scoring runs on the blocking pool since it
/// walks every movie in the matrix.
pub async fn recommend_movies(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<RecommendationResponse>> {
    let user_id = state.draw_user_id().await;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        "Processing recommendation request"
    );

    let recommender = state.recommender.clone();
    let recommendations = tokio::task::spawn_blocking(move || recommender.recommend_for(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendation completed"
    );

    Ok(Json(RecommendationResponse {
        user_id,
        recommendations,
    }))
}

/// Any method other than GET on the recommendation endpoint
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
