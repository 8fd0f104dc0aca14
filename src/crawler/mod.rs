//! Crawler module for discovering article URLs
//!
//! This module contains the crawl logic, including:
//! - Link extraction from hub pages
//! - Request pacing and failure backoff
//! - Overall crawl coordination

mod coordinator;
mod links;
mod throttle;

pub use coordinator::{CrawlReport, Crawler, StopReason};
pub use links::{extract_links, filter_links};
pub use throttle::{pause, Backoff, RequestThrottle};

use crate::config::Config;
use crate::page::HttpPage;
use crate::state::ShutdownFlag;
use crate::storage::open_storage;
use crate::Result;

/// Runs a complete crawl against the configured site
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the data directory and load the frontier
/// 2. Build the HTTP page driver
/// 3. Visit queued URLs until the frontier drains or the run stops
/// 4. Save the frontier
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `start_urls` - Extra URLs to queue before crawling
/// * `shutdown` - Flag checked between URLs
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ended normally or was interrupted
/// * `Err(HarvestError)` - Access was denied or state could not be saved
pub async fn crawl(
    config: &Config,
    start_urls: &[String],
    shutdown: ShutdownFlag,
) -> Result<CrawlReport> {
    let storage = open_storage(&config.data_dir(), &config.corpus_path())?;
    let page = HttpPage::new(&config.http)?;

    let mut crawler = Crawler::new(page, storage, config, shutdown)?;
    crawler.run(start_urls).await
}
