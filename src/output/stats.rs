//! Frontier statistics
//!
//! This module provides functionality for summarizing the persisted
//! crawl and scrape state.

use crate::storage::Storage;
use crate::Result;

/// Sizes of the persisted URL sets and the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierStatistics {
    pub visited: usize,
    pub to_explore: usize,
    pub content_urls: usize,
    pub to_scrape: usize,
    /// Articles in the corpus
    pub corpus_size: usize,
}

impl FrontierStatistics {
    /// Share of visited pages that are content pages
    pub fn content_ratio(&self) -> f64 {
        if self.visited == 0 {
            0.0
        } else {
            self.content_urls as f64 / self.visited as f64 * 100.0
        }
    }
}

/// Loads statistics from storage
pub fn load_statistics(storage: &dyn Storage) -> Result<FrontierStatistics> {
    let frontier = storage.load_frontier()?;
    let corpus = storage.load_corpus()?;

    Ok(FrontierStatistics {
        visited: frontier.visited().len(),
        to_explore: frontier.to_explore().len(),
        content_urls: frontier.content_urls().len(),
        to_scrape: frontier.to_scrape().len(),
        corpus_size: corpus.len(),
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &FrontierStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Crawl:");
    println!("  Visited: {}", stats.visited);
    println!("  To explore: {}", stats.to_explore);
    println!(
        "  Content URLs: {} ({:.1}% of visited)",
        stats.content_urls,
        stats.content_ratio()
    );
    println!();

    println!("Scrape:");
    println!("  To scrape: {}", stats.to_scrape);
    println!("  Articles saved: {}", stats.corpus_size);

    if stats.to_explore == 0 && stats.visited > 0 {
        println!("\n✓ Crawl frontier is exhausted");
    }
}
