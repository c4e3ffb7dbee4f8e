use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::Recommender,
};

pub mod recommend;
pub mod reload;

/// Creates the application router with all routes.
///
/// CORS stays permissive: the service sits behind a browser frontend on a
/// different origin. Request-id assignment runs outside the trace layer so
/// every span carries the correlation id.
pub fn create_router(recommender: Arc<Recommender>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommend", post(recommend::recommend))
        .route("/reload", post(reload::reload))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(recommender)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
