//! File-backed storage
//!
//! Layout under the data directory:
//! - `visited.txt`, `to_explore.txt`, `to_scrape.txt`: rewritten on save
//! - `content_urls.txt`: append-only
//! - the corpus file, wherever the configuration puts it

use crate::articles::ArticleRecord;
use crate::state::Frontier;
use crate::storage::corpus::{read_corpus, write_corpus};
use crate::storage::lines::{append_url_lines, read_url_lines, write_url_lines};
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{CONTENT_URLS_FILE, TO_EXPLORE_FILE, TO_SCRAPE_FILE, VISITED_FILE};
use std::path::{Path, PathBuf};

/// Storage backed by plain files
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
    corpus_path: PathBuf,
}

impl FileStorage {
    /// Opens storage, creating the data directory if needed
    pub fn open(data_dir: &Path, corpus_path: &Path) -> StorageResult<Self> {
        std::fs::create_dir_all(data_dir).map_err(|e| StorageError::io(data_dir, e))?;
        if let Some(parent) = corpus_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            corpus_path: corpus_path.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn corpus_path(&self) -> &Path {
        &self.corpus_path
    }

    fn file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

impl Storage for FileStorage {
    fn load_frontier(&self) -> StorageResult<Frontier> {
        let visited = read_url_lines(&self.file(VISITED_FILE))?;
        let to_explore = read_url_lines(&self.file(TO_EXPLORE_FILE))?;
        let content_urls = read_url_lines(&self.file(CONTENT_URLS_FILE))?;
        let to_scrape = read_url_lines(&self.file(TO_SCRAPE_FILE))?;

        Ok(Frontier::from_parts(
            visited,
            to_explore,
            content_urls,
            to_scrape,
        ))
    }

    fn save_crawl_state(&mut self, frontier: &Frontier) -> StorageResult<()> {
        // Content goes first: once a URL is in visited.txt it is never classified again
        append_url_lines(&self.file(CONTENT_URLS_FILE), frontier.new_content())?;
        write_url_lines(&self.file(VISITED_FILE), frontier.visited())?;
        write_url_lines(&self.file(TO_EXPLORE_FILE), frontier.to_explore())?;

        tracing::debug!(
            "Saved crawl state: {} visited, {} to explore, {} new content URLs",
            frontier.visited().len(),
            frontier.to_explore().len(),
            frontier.new_content().len()
        );
        Ok(())
    }

    fn save_scrape_queue(&mut self, frontier: &Frontier) -> StorageResult<()> {
        write_url_lines(&self.file(TO_SCRAPE_FILE), frontier.to_scrape())?;
        tracing::debug!("Saved {} URLs left to scrape", frontier.to_scrape().len());
        Ok(())
    }

    fn load_corpus(&self) -> StorageResult<Vec<serde_json::Value>> {
        read_corpus(&self.corpus_path)
    }

    fn append_articles(&mut self, articles: &[ArticleRecord]) -> StorageResult<usize> {
        let mut corpus = read_corpus(&self.corpus_path)?;
        if articles.is_empty() {
            return Ok(corpus.len());
        }

        for article in articles {
            corpus.push(serde_json::to_value(article)?);
        }
        write_corpus(&self.corpus_path, &corpus)?;

        tracing::info!(
            "Saved {} articles to {} ({} total)",
            articles.len(),
            self.corpus_path.display(),
            corpus.len()
        );
        Ok(corpus.len())
    }
}
