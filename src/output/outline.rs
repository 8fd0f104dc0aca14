//! Article structure outline
//!
//! Renders the section structure of every saved article as indented text
//! for human inspection. Two article shapes are understood:
//! - nested section objects, where every key other than `title` and
//!   `content` names a subsection
//! - flattened markdown strings, where heading lines carry the structure

use crate::storage::{read_corpus, StorageError};
use crate::Result;
use serde_json::{Map, Value};
use std::path::Path;

/// Default output file name
pub const DEFAULT_OUTLINE_FILE: &str = "article_structure.txt";

const INDENT: &str = "  ";

/// Outline lines for one article
pub fn build_article_outline(article: &Value) -> Vec<String> {
    let name = article
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Unnamed Article");
    let mut lines = vec![format!("📘 {}", name)];

    match article.get("content") {
        Some(Value::Object(sections)) => build_section_tree(sections, 1, &mut lines),
        Some(Value::String(markdown)) => build_heading_tree(markdown, &mut lines),
        _ => {}
    }

    lines
}

fn build_section_tree(sections: &Map<String, Value>, depth: usize, lines: &mut Vec<String>) {
    for (key, value) in sections {
        if key == "title" || key == "content" {
            continue;
        }
        lines.push(format!("{}📂 {}", INDENT.repeat(depth), key));
        if let Value::Object(children) = value {
            build_section_tree(children, depth + 1, lines);
        }
    }
}

fn build_heading_tree(markdown: &str, lines: &mut Vec<String>) {
    for line in markdown.lines() {
        let hashes = line.chars().take_while(|c| *c == '#').count();
        if !(1..=6).contains(&hashes) {
            continue;
        }
        if let Some(title) = line[hashes..].strip_prefix(' ') {
            lines.push(format!("{}📂 {}", INDENT.repeat(hashes), title.trim()));
        }
    }
}

/// Outline of every article, one blank line after each
pub fn render_outline(articles: &[Value]) -> String {
    let mut lines = Vec::new();
    for article in articles {
        lines.extend(build_article_outline(article));
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Reads a corpus and writes its outline
///
/// Returns the number of articles outlined.
pub fn write_outline(corpus_path: &Path, output_path: &Path) -> Result<usize> {
    let articles = read_corpus(corpus_path)?;
    std::fs::write(output_path, render_outline(&articles))
        .map_err(|e| StorageError::io(output_path, e))?;

    tracing::info!("Structure saved to: {}", output_path.display());
    Ok(articles.len())
}
