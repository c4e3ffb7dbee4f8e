use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{
    db::{DocumentStore, StoreDocument},
    error::{AppError, AppResult},
};

/// Document store client over the store's REST read API.
///
/// Endpoints:
/// - `GET {base}/collections/{name}/documents` → `[{ "id": ..., "data": {...} }]`
/// - `GET {base}/users/{id}/watch-history` → `[{...}, ...]`
#[derive(Clone)]
pub struct HttpDocumentStore {
    http_client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl HttpDocumentStore {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{}/documents", self.base_url, collection)
    }

    fn history_url(&self, user_id: &str) -> String {
        format!("{}/users/{}/watch-history", self.base_url, user_id)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let mut request = self.http_client.get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(url = %url, status = %status, body = %body, "Document store request failed");
            return Err(AppError::Store(format!(
                "store returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn fetch_catalog(&self, collection: &str) -> AppResult<Vec<StoreDocument>> {
        let url = self.collection_url(collection);
        tracing::debug!(collection = %collection, "Fetching catalog collection");
        self.get_json(&url).await
    }

    async fn fetch_watch_history(&self, user_id: &str) -> AppResult<Vec<Value>> {
        let url = self.history_url(user_id);
        tracing::debug!(user_id = %user_id, "Fetching watch history");
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_built_against_trimmed_base() {
        let store = HttpDocumentStore::new("http://store.local/".to_string(), None);

        assert_eq!(
            store.collection_url("enrichedMovies"),
            "http://store.local/collections/enrichedMovies/documents"
        );
        assert_eq!(
            store.history_url("u1"),
            "http://store.local/users/u1/watch-history"
        );
    }
}
