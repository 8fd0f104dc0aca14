//! JSON article corpus
//!
//! The corpus is a pretty-printed JSON array. Entries are kept as raw JSON
//! values so that older article shapes survive a rewrite untouched.

use crate::storage::traits::{StorageError, StorageResult};
use crate::storage::write_atomic;
use serde_json::Value;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

/// Reads the corpus; a missing or empty file reads as an empty corpus
pub fn read_corpus(path: &Path) -> StorageResult<Vec<Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => Ok(items),
        other => Err(StorageError::Corrupt {
            path: path.to_path_buf(),
            message: format!("expected a JSON array, found {}", json_kind(&other)),
        }),
    }
}

/// Writes the corpus as an indented JSON array
pub fn write_corpus(path: &Path, articles: &[Value]) -> StorageResult<()> {
    let mut json = serde_json::to_string_pretty(articles)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

/// Collects the `link` of every saved article
pub fn corpus_links(articles: &[Value]) -> HashSet<String> {
    articles
        .iter()
        .filter_map(|article| article.get("link").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
