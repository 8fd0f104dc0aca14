//! Flattens an article's main content into markdown-like text
//!
//! Only direct children are inspected at each level:
//! - `h1`..`h6` become `#` headings
//! - `p` is kept only when it carries the topic paragraph marker
//! - `div` is recursed into unless it is a figure or illustration block
//! - `section` is always recursed into
//! - anything else is ignored

use crate::config::SelectorConfig;
use crate::page::DomNode;

/// Converts a main-content element into markdown-like text
///
/// Section boundaries are flattened; only inline headings carry
/// structure in the result. Leading and trailing whitespace is trimmed.
pub fn element_to_markdown(element: &DomNode, markers: &SelectorConfig) -> String {
    let mut markdown = String::new();

    for child in element.element_children() {
        if let Some(level) = child.heading_level() {
            markdown.push('\n');
            markdown.push_str(&"#".repeat(level));
            markdown.push(' ');
            markdown.push_str(child.inner_text().trim());
            markdown.push('\n');
            continue;
        }

        match child.tag() {
            "p" => {
                if child.attr("data-testid") != Some(markers.topic_paragraph_testid.as_str()) {
                    continue;
                }
                let paragraph = child.inner_text();
                let paragraph = paragraph.trim();
                if !paragraph.is_empty() {
                    markdown.push_str(paragraph);
                    markdown.push_str("\n\n");
                }
            }
            "div" => {
                if is_figure_block(child, markers) {
                    continue;
                }
                push_nested(&mut markdown, &element_to_markdown(child, markers));
            }
            "section" => push_nested(&mut markdown, &element_to_markdown(child, markers)),
            _ => {}
        }
    }

    markdown.trim().to_string()
}

/// Figure class is matched as a substring of the whole `class` attribute
fn is_figure_block(node: &DomNode, markers: &SelectorConfig) -> bool {
    let class = node.attr("class").unwrap_or_default();
    class.contains(markers.figure_class.as_str())
        || node.attr("data-testid") == Some(markers.illustrative_testid.as_str())
}

fn push_nested(markdown: &mut String, inner: &str) {
    if !inner.trim().is_empty() {
        markdown.push_str(inner);
        markdown.push('\n');
    }
}
