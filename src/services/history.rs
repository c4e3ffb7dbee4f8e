use crate::{db::DocumentStore, models::WatchHistoryRecord};

/// Read a user's watch history.
///
/// History absence is a normal case: an unreachable store, an unknown user
/// and an empty namespace all come back as an empty list, never an error.
/// Field defaulting (duration → 0, fully-watched → false) happens in the
/// record's serde contract, so callers always see fully-populated records.
pub async fn fetch_history(store: &dyn DocumentStore, user_id: &str) -> Vec<WatchHistoryRecord> {
    let documents = match store.fetch_watch_history(user_id).await {
        Ok(documents) => documents,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Watch history unavailable, treating as empty");
            return Vec::new();
        }
    };

    documents
        .into_iter()
        .filter_map(|doc| match serde_json::from_value::<WatchHistoryRecord>(doc) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Skipping malformed watch history record");
                None
            }
        })
        .collect()
}
