use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendations,
    services::Recommender,
};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    /// Optional result-count override; the configured default applies otherwise.
    #[serde(rename = "topN", default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Recommendations,
}

/// Handler for the recommendation endpoint
pub async fn recommend(
    State(recommender): State<Arc<Recommender>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let user_id = request.user_id.ok_or(AppError::MissingUserId)?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        "Processing recommendation request"
    );

    let recommendations = recommender
        .get_recommendations(&user_id, request.top_n)
        .await?;

    tracing::info!(
        request_id = %request_id,
        results = recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(RecommendResponse { recommendations }))
}
