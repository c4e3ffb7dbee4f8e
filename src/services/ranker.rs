use std::collections::HashSet;

use crate::{models::ScoredEntry, services::catalog::CatalogSnapshot};

/// Score the catalog against a taste profile and return the top `top_n`
/// unwatched entries, best match first.
///
/// Ties keep catalog load order (the sort is stable and candidates are
/// produced in table order), so repeated calls over unchanged state return
/// identical lists. Returns `None` when exclusion leaves no candidates.
pub fn rank(
    snapshot: &CatalogSnapshot,
    profile_text: &str,
    watched_slugs: &HashSet<String>,
    top_n: usize,
) -> Option<Vec<ScoredEntry>> {
    let query = snapshot.query_vector(profile_text);
    let scores = snapshot.similarities(&query);

    let mut candidates: Vec<(usize, f32)> = snapshot
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| !watched_slugs.contains(&entry.slug))
        .map(|(i, _)| (i, scores[i]))
        .collect();

    if candidates.is_empty() {
        tracing::info!("Every catalog entry is already watched, nothing to rank");
        return None;
    }

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    Some(
        candidates
            .into_iter()
            .take(top_n)
            .map(|(i, score)| ScoredEntry::new(&snapshot.entries()[i], score))
            .collect(),
    )
}
