//! Storage module for persisting crawl and scrape state
//!
//! This module handles:
//! - Line-delimited URL files for the frontier sets
//! - The JSON article corpus
//! - Atomic replacement of rewritten files

mod corpus;
mod file;
mod lines;
mod traits;

pub use corpus::{corpus_links, read_corpus, write_corpus};
pub use file::FileStorage;
pub use lines::{append_url_lines, read_url_lines, write_url_lines};
pub use traits::{Storage, StorageError, StorageResult};

use crate::HarvestError;
use std::path::Path;

/// File names of the persisted URL sets
pub const VISITED_FILE: &str = "visited.txt";
pub const TO_EXPLORE_FILE: &str = "to_explore.txt";
pub const CONTENT_URLS_FILE: &str = "content_urls.txt";
pub const TO_SCRAPE_FILE: &str = "to_scrape.txt";

/// Opens file storage rooted at `data_dir`
///
/// # Arguments
///
/// * `data_dir` - Directory holding the URL files; created if missing
/// * `corpus_path` - Path of the JSON article corpus
pub fn open_storage(data_dir: &Path, corpus_path: &Path) -> Result<FileStorage, HarvestError> {
    Ok(FileStorage::open(data_dir, corpus_path)?)
}

/// Writes `contents` to a sibling temporary file and renames it over `path`
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> StorageResult<()> {
    let mut tmp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, contents).map_err(|e| StorageError::io(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}
