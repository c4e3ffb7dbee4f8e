use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the document store read API
    #[serde(default = "default_store_base_url")]
    pub store_base_url: String,

    /// Bearer token for the document store (optional for local stores)
    #[serde(default)]
    pub store_api_key: Option<String>,

    /// Catalog collection holding the enriched movie documents
    #[serde(default = "default_catalog_collection")]
    pub catalog_collection: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum watch time before a history record counts toward the taste profile
    #[serde(default = "default_min_watch_duration_seconds")]
    pub min_watch_duration_seconds: u64,

    /// Maximum number of watched movies combined into one taste profile
    #[serde(default = "default_max_profile_movies")]
    pub max_profile_movies: usize,

    /// A term must appear in at least this many catalog entries to enter the vocabulary
    #[serde(default = "default_min_document_frequency")]
    pub min_document_frequency: usize,

    /// Recommendations returned when a request does not ask for a count
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

fn default_store_base_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_catalog_collection() -> String {
    "enrichedMovies".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_min_watch_duration_seconds() -> u64 {
    60
}

fn default_max_profile_movies() -> usize {
    50
}

fn default_min_document_frequency() -> usize {
    5
}

fn default_top_n() -> usize {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
