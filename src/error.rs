use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::RecommendError;

/// Message returned for every failed recommendation
pub const USER_NOT_FOUND: &str = "User not found";

/// Message returned for unsupported methods on the recommendation endpoint
pub const INVALID_METHOD: &str = "Invalid request method";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Recommendation error: {0}")]
    Recommend(#[from] RecommendError),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Clients only ever see the generic message; the detail goes to the log
        let (status, message) = match &self {
            AppError::Recommend(e) => {
                tracing::warn!(error = %e, "Recommendation failed");
                (StatusCode::NOT_FOUND, USER_NOT_FOUND.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Recommendation task failed");
                (StatusCode::NOT_FOUND, USER_NOT_FOUND.to_string())
            }
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, INVALID_METHOD.to_string())
            }
        };

        let body = Json(json!({
            "recommendations": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
