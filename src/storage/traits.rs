//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::articles::ArticleRecord;
use crate::state::Frontier;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// A backend owns the persisted frontier sets and the article corpus.
/// Concurrent runs against the same backend are not supported.
pub trait Storage {
    // ===== Frontier =====

    /// Loads all four URL sets
    fn load_frontier(&self) -> StorageResult<Frontier>;

    /// Persists `visited` and `to_explore`, and appends content URLs
    /// recorded since the frontier was loaded
    ///
    /// Callers clear the frontier's new-content list after this succeeds.
    fn save_crawl_state(&mut self, frontier: &Frontier) -> StorageResult<()>;

    /// Persists `to_scrape`
    fn save_scrape_queue(&mut self, frontier: &Frontier) -> StorageResult<()>;

    // ===== Corpus =====

    /// Loads every saved article, whatever its shape
    fn load_corpus(&self) -> StorageResult<Vec<serde_json::Value>>;

    /// Appends articles to the corpus
    ///
    /// Returns the corpus size after the write.
    fn append_articles(&mut self, articles: &[ArticleRecord]) -> StorageResult<usize>;
}
