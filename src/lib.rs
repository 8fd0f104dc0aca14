//! Vetharvest: a resumable article harvester for a veterinary manual site
//!
//! This crate discovers article URLs by traversing hub pages, persists the
//! crawl frontier between runs, and flattens each article's main content
//! into a markdown-like string stored in a JSON corpus.

pub mod articles;
pub mod config;
pub mod crawler;
pub mod logging;
pub mod output;
pub mod page;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Vetharvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("403 Forbidden: access denied to {url}")]
    AccessDenied { url: String },

    #[error("Failed to load {url}: {source}")]
    Fetch {
        url: String,
        source: page::FetchError,
    },

    #[error("Page error: {0}")]
    Page(#[from] page::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns true if this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }
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

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("URL {url} is not on site {site}")]
    OffSite { url: String, site: String },
}

/// Result type alias for Vetharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use articles::{element_to_markdown, ArticleRecord, Harvester, ScrapeReport};
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, StopReason};
pub use page::{DomNode, HttpPage, Navigation, PageDriver, WaitCondition};
pub use state::{Frontier, PageState, ShutdownFlag};
pub use storage::{FileStorage, Storage};
