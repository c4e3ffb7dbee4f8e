use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;

pub mod http_store;

pub use http_store::HttpDocumentStore;

/// One raw document read from the store: its id plus the JSON payload.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreDocument {
    pub id: String,
    #[serde(default)]
    pub data: Value,
}

/// Read-only view of the external document store.
///
/// The recommender only ever reads: the full catalog collection at load
/// time and one user's watch-history namespace per request. Both sides of
/// the data (catalog parsing, history defaulting) are handled by the
/// services layer, so the store returns raw documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in a named collection, including the reserved
    /// `metadata` document (callers filter it out).
    async fn fetch_catalog(&self, collection: &str) -> AppResult<Vec<StoreDocument>>;

    /// Fetch all watch-history documents under a user's namespace.
    async fn fetch_watch_history(&self, user_id: &str) -> AppResult<Vec<Value>>;
}
