use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    services::Recommender,
};

/// Handler forcing a full catalog reload.
///
/// Reload is the same operation as the startup load: a fresh snapshot is
/// built and swapped in wholesale. An empty outcome still replaces the
/// previous snapshot and reports the service as not ready.
pub async fn reload(
    State(recommender): State<Arc<Recommender>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<Value>> {
    let entries = recommender.initialize().await;

    if entries == 0 {
        tracing::warn!(request_id = %request_id, "Catalog reload yielded no entries");
        return Err(AppError::ServiceNotReady);
    }

    tracing::info!(request_id = %request_id, entries = entries, "Catalog reloaded");
    Ok(Json(json!({ "status": "reloaded", "entries": entries })))
}
