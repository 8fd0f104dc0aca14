//! Owned DOM snapshots
//!
//! Query results are copied out of the parsed document into [`DomNode`]
//! trees so callers never hold borrows into parser state.

use crate::{HarvestError, Result};
use scraper::{ElementRef, Html, Node, Selector};

/// A child of a DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomChild {
    Element(DomNode),
    Text(String),
}

/// Read-only element snapshot: tag, attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomNode {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<DomChild>,
}

/// Elements that start a new line in rendered text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p",
    "pre", "section", "table", "tr", "ul",
];

/// Elements whose text is never rendered
const HIDDEN_TAGS: &[&str] = &["script", "style", "template", "noscript"];

impl DomNode {
    /// Creates an empty element; the tag is lowercased
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(DomChild::Element(child));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(DomChild::Text(text.to_string()));
        self
    }

    /// Copies a parsed element and its whole subtree
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let value = element.value();
        let mut node = Self {
            tag: value.name().to_ascii_lowercase(),
            attributes: value
                .attrs()
                .map(|(name, val)| (name.to_string(), val.to_string()))
                .collect(),
            children: Vec::new(),
        };

        for child in element.children() {
            match child.value() {
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        node.children
                            .push(DomChild::Element(Self::from_element(child_element)));
                    }
                }
                Node::Text(text) => {
                    let text: &str = text;
                    node.children.push(DomChild::Text(text.to_string()));
                }
                _ => {}
            }
        }

        node
    }

    /// Lowercase tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Reads an attribute; absent attributes are `None`, never `""`
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[DomChild] {
        &self.children
    }

    /// Direct element children in document order
    pub fn element_children(&self) -> impl Iterator<Item = &DomNode> {
        self.children.iter().filter_map(|child| match child {
            DomChild::Element(node) => Some(node),
            DomChild::Text(_) => None,
        })
    }

    /// Heading level for `h1`..`h6`
    pub fn heading_level(&self) -> Option<usize> {
        let digit = self.tag.strip_prefix('h')?;
        match digit.parse::<usize>() {
            Ok(level @ 1..=6) if digit.len() == 1 => Some(level),
            _ => None,
        }
    }

    /// Approximates rendered text
    ///
    /// Whitespace runs collapse to one space, `<br>` becomes a newline and
    /// block-level elements sit on their own lines. Lines are trimmed.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);

        out.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn collect_text(node: &DomNode, out: &mut String) {
    for child in &node.children {
        match child {
            DomChild::Text(text) => push_collapsed(out, text),
            DomChild::Element(element) => {
                let tag = element.tag();
                if HIDDEN_TAGS.contains(&tag) {
                    continue;
                }
                if tag == "br" {
                    out.push('\n');
                } else if BLOCK_TAGS.contains(&tag) {
                    break_line(out);
                    collect_text(element, out);
                    break_line(out);
                } else {
                    collect_text(element, out);
                }
            }
        }
    }
}

fn push_collapsed(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') && !out.ends_with('\n') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
}

fn break_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Parses a CSS selector, mapping failures into [`HarvestError::Selector`]
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| HarvestError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Returns the first element in `html` matching `selector`
pub fn query_first(html: &str, selector: &str) -> Result<Option<DomNode>> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).next().map(DomNode::from_element);
    Ok(found)
}

/// Returns every element in `html` matching `selector`
pub fn query_all(html: &str, selector: &str) -> Result<Vec<DomNode>> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).map(DomNode::from_element).collect();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_first_copies_subtree() {
        let html = r#"<html><body><div id="main" class="a b"><p>One</p><p>Two</p></div></body></html>"#;
        let node = query_first(html, "#main").unwrap().unwrap();

        assert_eq!(node.tag(), "div");
        assert_eq!(node.attr("class"), Some("a b"));
        assert_eq!(node.element_children().count(), 2);
    }

    #[test]
    fn test_query_first_no_match() {
        let html = "<html><body><p>x</p></body></html>";
        assert!(query_first(html, "section").unwrap().is_none());
    }

    #[test]
    fn test_query_all_document_order() {
        let html = r#"<div><a href="/1">1</a><span><a href="/2">2</a></span><a href="/3">3</a></div>"#;
        let anchors = query_all(html, "a").unwrap();
        let hrefs: Vec<_> = anchors.iter().filter_map(|a| a.attr("href")).collect();
        assert_eq!(hrefs, vec!["/1", "/2", "/3"]);
    }

    #[test]
    fn test_invalid_selector() {
        let result = query_first("<p></p>", "[[[");
        assert!(matches!(result, Err(HarvestError::Selector { .. })));
    }

    #[test]
    fn test_missing_attribute_is_none() {
        let node = DomNode::new("p");
        assert_eq!(node.attr("data-testid"), None);
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(DomNode::new("h1").heading_level(), Some(1));
        assert_eq!(DomNode::new("H6").heading_level(), Some(6));
        assert_eq!(DomNode::new("h7").heading_level(), None);
        assert_eq!(DomNode::new("hr").heading_level(), None);
        assert_eq!(DomNode::new("header").heading_level(), None);
    }

    #[test]
    fn test_inner_text_collapses_whitespace() {
        let html = "<p>Hello <b>world</b>\n     again</p>";
        let node = query_first(html, "p").unwrap().unwrap();
        assert_eq!(node.inner_text(), "Hello world again");
    }

    #[test]
    fn test_inner_text_blocks_and_breaks() {
        let html = "<div><p>First</p><p>Second<br>line</p><script>var x;</script></div>";
        let node = query_first(html, "div").unwrap().unwrap();
        assert_eq!(node.inner_text(), "First\nSecond\nline");
    }

    #[test]
    fn test_built_tree() {
        let node = DomNode::new("DIV")
            .with_attr("class", "Figure_x")
            .with_child(DomNode::new("p").with_text("  caption  "));

        assert_eq!(node.tag(), "div");
        assert_eq!(node.inner_text(), "caption");
    }
}
