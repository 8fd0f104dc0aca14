//! One-URL-per-line files

use crate::storage::traits::{StorageError, StorageResult};
use crate::storage::write_atomic;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Reads a URL file; a missing file reads as empty
///
/// Lines are trimmed and blank lines ignored.
pub fn read_url_lines(path: &Path) -> StorageResult<Vec<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Replaces a URL file with the given URLs
pub fn write_url_lines<'a>(path: &Path, urls: impl IntoIterator<Item = &'a String>) -> StorageResult<()> {
    let mut content = String::new();
    for url in urls {
        content.push_str(url);
        content.push('\n');
    }
    write_atomic(path, content.as_bytes())
}

/// Appends URLs to a file, creating it if needed
pub fn append_url_lines(path: &Path, urls: &[String]) -> StorageResult<()> {
    if urls.is_empty() {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StorageError::io(path, e))?;

    let mut content = String::new();
    for url in urls {
        content.push_str(url);
        content.push('\n');
    }
    file.write_all(content.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| StorageError::io(path, e))
}
