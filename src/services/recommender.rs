use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::Config,
    db::DocumentStore,
    error::{AppError, AppResult},
    models::{FallbackEntry, Recommendations},
    services::{
        catalog::{self, CatalogSnapshot},
        history, profile, ranker,
    },
};

/// Deployment tunables for catalog loading, profile building and ranking.
#[derive(Debug, Clone)]
pub struct RecommenderSettings {
    pub catalog_collection: String,
    pub min_watch_duration_seconds: u64,
    pub max_profile_movies: usize,
    pub min_document_frequency: usize,
    pub default_top_n: usize,
}

impl From<&Config> for RecommenderSettings {
    fn from(config: &Config) -> Self {
        Self {
            catalog_collection: config.catalog_collection.clone(),
            min_watch_duration_seconds: config.min_watch_duration_seconds,
            max_profile_movies: config.max_profile_movies,
            min_document_frequency: config.min_document_frequency,
            default_top_n: config.default_top_n,
        }
    }
}

/// The recommendation service and owner of the shared catalog state.
///
/// The current snapshot lives behind one `RwLock<Option<Arc<...>>>` handle.
/// Reloads build the replacement entirely outside the lock and hold the
/// write guard only for the pointer swap, so requests reading the previous
/// generation are never stalled and never observe a table and matrix from
/// different loads.
pub struct Recommender {
    store: Arc<dyn DocumentStore>,
    settings: RecommenderSettings,
    snapshot: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl Recommender {
    pub fn new(store: Arc<dyn DocumentStore>, settings: RecommenderSettings) -> Self {
        Self {
            store,
            settings,
            snapshot: RwLock::new(None),
        }
    }

    /// Load the catalog and publish the outcome as the current snapshot,
    /// replacing whatever was there — including publishing the empty state
    /// when the load fails. Returns the number of entries published.
    ///
    /// Used for the startup load, the `/reload` endpoint and the one
    /// self-healing retry a request may trigger.
    pub async fn initialize(&self) -> usize {
        let loaded = catalog::load_catalog(
            self.store.as_ref(),
            &self.settings.catalog_collection,
            self.settings.min_document_frequency,
        )
        .await
        .map(Arc::new);

        let entries = loaded.as_ref().map(|s| s.len()).unwrap_or(0);
        *self.snapshot.write().await = loaded;
        entries
    }

    /// The snapshot a request should use, cloned once at request start.
    pub async fn current_snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.snapshot.read().await.clone()
    }

    /// Compute recommendations for a user.
    ///
    /// Every degraded internal state (no history, nothing qualifying,
    /// nothing resolving, candidates exhausted) routes to the fallback
    /// listing. The only failures a caller sees are a missing user id and
    /// a catalog that is still empty after one reload attempt.
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        top_n: Option<usize>,
    ) -> AppResult<Recommendations> {
        if user_id.trim().is_empty() {
            return Err(AppError::MissingUserId);
        }
        let top_n = top_n.unwrap_or(self.settings.default_top_n);

        let snapshot = match self.current_snapshot().await {
            Some(snapshot) => snapshot,
            None => {
                tracing::warn!("Catalog snapshot absent, attempting reload");
                self.initialize().await;
                self.current_snapshot()
                    .await
                    .ok_or(AppError::ServiceNotReady)?
            }
        };

        let history = history::fetch_history(self.store.as_ref(), user_id).await;

        let Some(profile) = profile::build_profile(
            &history,
            &snapshot,
            self.settings.min_watch_duration_seconds,
            self.settings.max_profile_movies,
        ) else {
            tracing::info!(user_id = %user_id, "No usable taste profile, serving default listing");
            return Ok(Recommendations::Fallback(fallback(&snapshot, top_n)));
        };

        match ranker::rank(&snapshot, &profile.text, &profile.watched_slugs, top_n) {
            Some(ranked) => {
                tracing::info!(
                    user_id = %user_id,
                    profile_movies = profile.watched_slugs.len(),
                    results = ranked.len(),
                    "Ranked recommendations computed"
                );
                Ok(Recommendations::Ranked(ranked))
            }
            None => Ok(Recommendations::Fallback(fallback(&snapshot, top_n))),
        }
    }
}

/// The deterministic default result set: the first `top_n` catalog entries
/// in load order, reduced field set. Table order is assumed to encode
/// desirability upstream; this never re-sorts.
pub fn fallback(snapshot: &CatalogSnapshot, top_n: usize) -> Vec<FallbackEntry> {
    snapshot
        .entries()
        .iter()
        .take(top_n)
        .map(FallbackEntry::from)
        .collect()
}
