use std::collections::HashSet;

use crate::{models::WatchHistoryRecord, services::catalog::CatalogSnapshot};

/// A user's aggregated viewing interest for one recommendation computation:
/// the joined feature text of their qualifying watched movies, plus the
/// resolved slugs to exclude from the ranking.
#[derive(Debug)]
pub struct TasteProfile {
    pub text: String,
    pub watched_slugs: HashSet<String>,
}

/// Build a taste profile from watch history.
///
/// Records below `min_watch_duration_seconds` are treated as accidental
/// plays and ignored. The remainder is ordered by watch time descending
/// (ties keep history order) and capped at `max_profile_movies`, weighting
/// the profile toward the strongest engagement signals.
///
/// Returns `None` when nothing qualifies or nothing resolves against the
/// catalog; the caller falls back to the default listing.
pub fn build_profile(
    history: &[WatchHistoryRecord],
    snapshot: &CatalogSnapshot,
    min_watch_duration_seconds: u64,
    max_profile_movies: usize,
) -> Option<TasteProfile> {
    let mut qualifying: Vec<&WatchHistoryRecord> = history
        .iter()
        .filter(|r| r.total_watched_duration_seconds >= min_watch_duration_seconds)
        .collect();

    // Stable: equal durations keep their original history order.
    qualifying.sort_by(|a, b| {
        b.total_watched_duration_seconds
            .cmp(&a.total_watched_duration_seconds)
    });
    qualifying.truncate(max_profile_movies);

    if qualifying.is_empty() {
        return None;
    }

    let mut features: Vec<&str> = Vec::new();
    let mut watched_slugs: HashSet<String> = HashSet::new();

    for record in qualifying {
        let Some(slug) = record.slug.as_deref() else {
            tracing::debug!(movie_id = ?record.movie_id, "History record without slug, skipping");
            continue;
        };

        match snapshot.entry_by_slug(slug) {
            Some(entry) => {
                features.push(&entry.combined_features);
                watched_slugs.insert(slug.to_string());
            }
            None => {
                tracing::warn!(slug = %slug, "Watched movie not present in catalog, skipping");
            }
        }
    }

    if features.is_empty() {
        return None;
    }

    Some(TasteProfile {
        text: features.join(" "),
        watched_slugs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MockDocumentStore, StoreDocument};
    use crate::services::catalog;
    use serde_json::json;

    async fn snapshot_of(entries: &[(&str, &str)]) -> CatalogSnapshot {
        let docs: Vec<StoreDocument> = entries
            .iter()
            .map(|(slug, features)| StoreDocument {
                id: slug.to_string(),
                data: json!({
                    "slug": slug,
                    "name": slug.to_uppercase(),
                    "combined_features": features,
                }),
            })
            .collect();

        let mut store = MockDocumentStore::new();
        store
            .expect_fetch_catalog()
            .return_once(move |_| Ok(docs));
        catalog::load_catalog(&store, "enrichedMovies", 1)
            .await
            .unwrap()
    }

    fn record(slug: Option<&str>, duration: u64) -> WatchHistoryRecord {
        WatchHistoryRecord {
            movie_id: slug.map(|s| format!("id-{s}")),
            title: None,
            genres: vec![],
            slug: slug.map(|s| s.to_string()),
            poster_url: None,
            thumb_url: None,
            year: None,
            last_watched_episode_slug: None,
            last_watched_episode_name: None,
            total_watched_duration_seconds: duration,
            is_fully_watched: false,
        }
    }

    #[tokio::test]
    async fn test_short_plays_do_not_qualify() {
        let snapshot = snapshot_of(&[("a", "action heist")]).await;
        let history = vec![record(Some("a"), 30)];

        assert!(build_profile(&history, &snapshot, 60, 50).is_none());
    }

    #[tokio::test]
    async fn test_profile_joins_features_of_resolved_records() {
        let snapshot = snapshot_of(&[("a", "action heist"), ("b", "space opera")]).await;
        let history = vec![record(Some("b"), 600), record(Some("a"), 300)];

        let profile = build_profile(&history, &snapshot, 60, 50).unwrap();
        // "b" was watched longer, so its features lead the profile.
        assert_eq!(profile.text, "space opera action heist");
        assert!(profile.watched_slugs.contains("a"));
        assert!(profile.watched_slugs.contains("b"));
    }

    #[tokio::test]
    async fn test_cap_keeps_longest_watched() {
        let snapshot =
            snapshot_of(&[("a", "one"), ("b", "two"), ("c", "three")]).await;
        let history = vec![
            record(Some("a"), 100),
            record(Some("b"), 900),
            record(Some("c"), 500),
        ];

        let profile = build_profile(&history, &snapshot, 60, 2).unwrap();
        assert!(profile.watched_slugs.contains("b"));
        assert!(profile.watched_slugs.contains("c"));
        assert!(!profile.watched_slugs.contains("a"));
    }

    #[tokio::test]
    async fn test_equal_durations_keep_history_order() {
        let snapshot = snapshot_of(&[("a", "one"), ("b", "two")]).await;
        let history = vec![record(Some("a"), 300), record(Some("b"), 300)];

        let profile = build_profile(&history, &snapshot, 60, 1).unwrap();
        assert!(profile.watched_slugs.contains("a"));
        assert!(!profile.watched_slugs.contains("b"));
    }

    #[tokio::test]
    async fn test_unresolved_and_slugless_records_are_skipped() {
        let snapshot = snapshot_of(&[("a", "action heist")]).await;
        let history = vec![
            record(None, 900),
            record(Some("gone"), 800),
            record(Some("a"), 120),
        ];

        let profile = build_profile(&history, &snapshot, 60, 50).unwrap();
        assert_eq!(profile.watched_slugs.len(), 1);
        assert!(profile.watched_slugs.contains("a"));
        assert_eq!(profile.text, "action heist");
    }

    #[tokio::test]
    async fn test_nothing_resolved_is_none() {
        let snapshot = snapshot_of(&[("a", "action heist")]).await;
        let history = vec![record(Some("gone"), 900), record(None, 600)];

        assert!(build_profile(&history, &snapshot, 60, 50).is_none());
    }

    #[tokio::test]
    async fn test_raising_threshold_never_adds_records() {
        let snapshot = snapshot_of(&[("a", "one"), ("b", "two"), ("c", "three")]).await;
        let history = vec![
            record(Some("a"), 59),
            record(Some("b"), 60),
            record(Some("c"), 400),
        ];

        let eligible = |threshold: u64| {
            build_profile(&history, &snapshot, threshold, 50)
                .map(|p| p.watched_slugs)
                .unwrap_or_default()
        };

        let at_60 = eligible(60);
        let at_120 = eligible(120);
        assert!(at_120.is_subset(&at_60));
        assert_eq!(at_60.len(), 2);
        assert_eq!(at_120.len(), 1);
    }
}
