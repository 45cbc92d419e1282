//! Shelf-Scout: on-demand product scraping service
//!
//! This crate accepts crawl jobs describing product sources (list pages to
//! crawl, known product pages, and per-field selectors), resolves product
//! URLs, scrapes each page with bounded concurrency, and exposes the results
//! by polling or through a best-effort callback.

pub mod config;
pub mod crawler;
pub mod jobs;
pub mod model;
pub mod server;

use thiserror::Error;

pub use crawler::{CrawlError, FetchError, MarkupError};

/// Main error type for Shelf-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid crawl request: {0}")]
    Request(#[from] RequestError),

    #[error(transparent)]
    Crawl(#[from] CrawlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while validating a submitted crawl request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("source #{index}: name must not be empty")]
    EmptySourceName { index: usize },

    #[error("source '{source_name}': {field} must not be empty")]
    EmptyField {
        source_name: String,
        field: &'static str,
    },

    #[error("{context}: URL '{url}' must use http or https")]
    UnsupportedScheme { context: String, url: String },
}

/// Result type alias for Shelf-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use jobs::{JobId, JobService, JobStatus, JobStore};
pub use model::{CrawlRequest, ProductSelectors, ScrapedProduct, SourceConfig};
