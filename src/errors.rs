use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// A failed check on user-supplied values, raised before persistence
///
/// Repositories run these checks ahead of every write; the database CHECK
/// constraints remain in place behind them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Latitude must be between 55.515174 and 56.106229, got {0}")]
    LatitudeOutOfBounds(f64),
    #[error("Longitude must be between 36.994695 and 37.956703, got {0}")]
    LongitudeOutOfBounds(f64),
    #[error("Rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(i32),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Database failures are opaque to clients; details go to the log
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
