//! Article scraping
//!
//! - `markdown`: flattens a main-content element into markdown-like text
//! - `harvester`: scrapes queued content URLs into [`ArticleRecord`]s

mod harvester;
mod markdown;

pub use harvester::{Harvester, ScrapeReport};
pub use markdown::element_to_markdown;

use crate::config::Config;
use crate::logging::LogMirror;
use crate::page::HttpPage;
use crate::state::ShutdownFlag;
use crate::storage::open_storage;
use crate::Result;
use serde::{Deserialize, Serialize};

/// One scraped article as stored in the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Trimmed page title
    pub name: String,
    /// URL the article was scraped from
    pub link: String,
    /// Flattened markdown-like body
    pub content: String,
}

/// Scrapes every queued content URL of the configured site
///
/// Console output is mirrored to a timestamped file in the configured log
/// directory for the duration of the run.
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `urls` - Extra URLs to queue before scraping
/// * `shutdown` - Flag checked between URLs
pub async fn scrape(config: &Config, urls: &[String], shutdown: ShutdownFlag) -> Result<ScrapeReport> {
    let mirror = LogMirror::acquire(&config.log_dir(), "scrape")?;
    tracing::info!("Mirroring log to {}", mirror.path().display());

    let storage = open_storage(&config.data_dir(), &config.corpus_path())?;
    let page = HttpPage::new(&config.http)?;

    let mut harvester = Harvester::new(page, storage, config, shutdown)?;
    harvester.run(urls).await
}
