use std::sync::Arc;

use cinerec_api::{
    config::Config,
    db::HttpDocumentStore,
    routes::create_router,
    services::{Recommender, RecommenderSettings},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinerec_api=info,tower_http=info".into()),
        )
        .init();

    let store = Arc::new(HttpDocumentStore::new(
        config.store_base_url.clone(),
        config.store_api_key.clone(),
    ));
    let recommender = Arc::new(Recommender::new(store, RecommenderSettings::from(&config)));

    // Initial catalog load. An empty outcome is not fatal: requests trigger
    // their own reload attempt and fail with 503 until the store has data.
    let entries = recommender.initialize().await;
    if entries == 0 {
        tracing::warn!("Starting with an empty catalog snapshot");
    } else {
        tracing::info!(entries = entries, "Catalog ready");
    }

    let app = create_router(recommender);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
