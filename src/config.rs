/// Configuration management for Feedline
///
/// Loads configuration from environment variables (and a `.env` file when present).
use anyhow::{bail, Context, Result};
use content_service::SortMode;
use feed_service::DEFAULT_TRENDING_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub feed: FeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, test, production)
    pub env: String,
    /// Fallback filter when RUST_LOG is unset
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, gone on exit
    Memory,
    /// One JSON document on disk
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Only read by the file backend
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Sort mode a fresh feed view starts with
    pub default_sort: SortMode,
    pub trending_limit: usize,
}

/// `FEED_*` variables as read by envy
#[derive(Debug, Deserialize)]
struct FeedEnv {
    default_sort: Option<String>,
    trending_limit: Option<usize>,
}

// Default values
fn default_storage_path() -> PathBuf {
    PathBuf::from("./feedline-storage.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                env: "development".to_string(),
                log_level: "info".to_string(),
                log_format: LogFormat::Pretty,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                path: default_storage_path(),
            },
            feed: FeedConfig {
                default_sort: SortMode::Latest,
                trending_limit: DEFAULT_TRENDING_LIMIT,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("LOG_FORMAT must be 'pretty' or 'json', got '{other}'"),
        };

        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format,
        };

        let backend = match std::env::var("STORAGE_BACKEND").ok().as_deref() {
            None | Some("") | Some("memory") => StorageBackend::Memory,
            Some("file") => StorageBackend::File,
            Some(other) => bail!("STORAGE_BACKEND must be 'memory' or 'file', got '{other}'"),
        };

        let storage = StorageConfig {
            backend,
            path: std::env::var("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_storage_path()),
        };

        let feed_env: FeedEnv = envy::prefixed("FEED_")
            .from_env()
            .context("Failed to read FEED_* environment variables")?;

        let feed = FeedConfig {
            default_sort: feed_env
                .default_sort
                .as_deref()
                .map(SortMode::from_name)
                .unwrap_or_default(),
            trending_limit: feed_env.trending_limit.unwrap_or(DEFAULT_TRENDING_LIMIT),
        };

        Ok(Config { app, storage, feed })
    }
}
