use serde::Deserialize;
use std::time::Duration;

/// Where the catalog snapshot is persisted
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotBackend {
    File,
    Redis,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key; without it the catalog can only come from a snapshot
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that poster paths are appended to
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Number of listing pages fetched when no snapshot exists
    #[serde(default = "default_catalog_pages")]
    pub catalog_pages: u32,

    #[serde(default = "default_snapshot_backend")]
    pub snapshot_backend: SnapshotBackend,

    /// Snapshot file path (file backend)
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Redis connection URL (redis backend)
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Attempts per external call before giving up
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,

    /// Fixed delay between attempts, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// OpenAI API key; photo captioning is disabled without it
    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    #[serde(default = "default_caption_model")]
    pub caption_model: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_catalog_pages() -> u32 {
    10
}

fn default_snapshot_backend() -> SnapshotBackend {
    SnapshotBackend::File
}

fn default_snapshot_path() -> String {
    "movie_data.json".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_fetch_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_openai_api_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_caption_model() -> String {
    "gpt-4-turbo".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
