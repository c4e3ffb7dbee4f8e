use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("A userId is required for recommendations")]
    MissingUserId,

    #[error("Recommendation service is not ready yet, please try again later")]
    ServiceNotReady,

    #[error("Document store error: {0}")]
    Store(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingUserId => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::ServiceNotReady => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AppError::Store(_) | AppError::HttpClient(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
