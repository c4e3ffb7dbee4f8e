use serde::{Deserialize, Serialize};

/// One movie or show in the recommendable catalog.
///
/// Deserialized from the enriched catalog documents in the external store.
/// `combined_features` is the pre-joined text blob (title, genres and
/// description tokens) the vectorizer runs on; documents without it never
/// make it into a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genres_slugs: Vec<String>,
    pub combined_features: String,
}

/// One watch-history record for a user, as stored upstream.
///
/// The upstream writer mixes camelCase and snake_case field names; the
/// renames below pin the wire contract. Every field is optional or defaulted
/// so downstream code never has to reason about missing keys: absent
/// durations read as 0 and absent completion flags as false.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchHistoryRecord {
    #[serde(rename = "movieId", default)]
    pub movie_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(rename = "lastWatchedEpisodeSlug", default)]
    pub last_watched_episode_slug: Option<String>,
    #[serde(rename = "lastWatchedEpisodeName", default)]
    pub last_watched_episode_name: Option<String>,
    #[serde(default)]
    pub total_watched_duration_seconds: u64,
    #[serde(default)]
    pub is_fully_watched: bool,
}

/// A catalog entry scored against a user's taste profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredEntry {
    pub slug: String,
    pub name: String,
    pub poster_url: Option<String>,
    pub thumb_url: Option<String>,
    pub year: Option<i32>,
    pub genres_slugs: Vec<String>,
    pub similarity: f32,
}

impl ScoredEntry {
    pub fn new(entry: &CatalogEntry, similarity: f32) -> Self {
        Self {
            slug: entry.slug.clone(),
            name: entry.name.clone(),
            poster_url: entry.poster_url.clone(),
            thumb_url: entry.thumb_url.clone(),
            year: entry.year,
            genres_slugs: entry.genres_slugs.clone(),
            similarity,
        }
    }
}

/// The reduced listing shape returned when no personalized ranking exists.
/// Carries no similarity and no genres; clients branch on field presence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FallbackEntry {
    pub slug: String,
    pub name: String,
    pub poster_url: Option<String>,
    pub thumb_url: Option<String>,
    pub year: Option<i32>,
}

impl From<&CatalogEntry> for FallbackEntry {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            slug: entry.slug.clone(),
            name: entry.name.clone(),
            poster_url: entry.poster_url.clone(),
            thumb_url: entry.thumb_url.clone(),
            year: entry.year,
        }
    }
}

/// Result of one recommendation computation.
///
/// Serialized untagged: ranked results carry a `similarity` field per item,
/// fallback listings do not, which is exactly how clients tell the two
/// shapes apart on the wire.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Recommendations {
    Ranked(Vec<ScoredEntry>),
    Fallback(Vec<FallbackEntry>),
}

impl Recommendations {
    pub fn len(&self) -> usize {
        match self {
            Recommendations::Ranked(entries) => entries.len(),
            Recommendations::Fallback(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
