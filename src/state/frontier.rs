use std::collections::{BTreeSet, HashSet};

/// The URL sets backing resumable crawl and scrape runs
///
/// - `visited`: fetched and classified; only ever grows
/// - `to_explore`: discovered but not yet fetched
/// - `content_urls`: classified as content; append-only
/// - `to_scrape`: content whose article has not been saved yet
///
/// Sets are ordered so that persisted files are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    visited: BTreeSet<String>,
    to_explore: BTreeSet<String>,
    content_urls: BTreeSet<String>,
    new_content: Vec<String>,
    to_scrape: BTreeSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a frontier from persisted sets
    ///
    /// A URL present in both `visited` and `to_explore` stays only in
    /// `visited`.
    pub fn from_parts(
        visited: impl IntoIterator<Item = String>,
        to_explore: impl IntoIterator<Item = String>,
        content_urls: impl IntoIterator<Item = String>,
        to_scrape: impl IntoIterator<Item = String>,
    ) -> Self {
        let visited: BTreeSet<String> = visited.into_iter().collect();
        let to_explore = to_explore
            .into_iter()
            .filter(|url| !visited.contains(url))
            .collect();

        Self {
            visited,
            to_explore,
            content_urls: content_urls.into_iter().collect(),
            new_content: Vec::new(),
            to_scrape: to_scrape.into_iter().collect(),
        }
    }

    // ===== Crawl =====

    /// Removes and returns a URL to visit
    ///
    /// No particular order is promised; the current order is reverse
    /// lexicographic.
    pub fn pop_to_explore(&mut self) -> Option<String> {
        self.to_explore.pop_last()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    /// Puts a URL back so the next run retries it
    pub fn requeue(&mut self, url: &str) {
        if !self.visited.contains(url) {
            self.to_explore.insert(url.to_string());
        }
    }

    /// Queues discovered URLs that have not been visited
    ///
    /// Returns the number of URLs that were not already queued.
    pub fn enqueue_discovered<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> usize {
        let mut added = 0;
        for url in urls {
            if !self.visited.contains(url) && self.to_explore.insert(url.to_string()) {
                added += 1;
            }
        }
        added
    }

    /// Records a content page
    ///
    /// Returns false if it was already known.
    pub fn record_content(&mut self, url: &str) -> bool {
        if self.content_urls.insert(url.to_string()) {
            self.new_content.push(url.to_string());
            true
        } else {
            false
        }
    }

    /// Content URLs recorded since this frontier was loaded, in discovery order
    pub fn new_content(&self) -> &[String] {
        &self.new_content
    }

    /// Marks newly recorded content as persisted
    pub fn clear_new_content(&mut self) {
        self.new_content.clear();
    }

    pub fn visited(&self) -> &BTreeSet<String> {
        &self.visited
    }

    pub fn to_explore(&self) -> &BTreeSet<String> {
        &self.to_explore
    }

    pub fn content_urls(&self) -> &BTreeSet<String> {
        &self.content_urls
    }

    // ===== Scrape =====

    /// Adds every content URL without a saved article to `to_scrape`
    ///
    /// URLs already queued stay queued. Returns the number of URLs added.
    pub fn init_to_scrape(&mut self, already_saved: &HashSet<String>) -> usize {
        let pending: Vec<String> = self
            .content_urls
            .iter()
            .filter(|url| !already_saved.contains(*url) && !self.to_scrape.contains(*url))
            .cloned()
            .collect();
        let added = pending.len();
        self.to_scrape.extend(pending);
        added
    }

    pub fn add_to_scrape(&mut self, url: &str) -> bool {
        self.to_scrape.insert(url.to_string())
    }

    /// Removes a URL whose article has been saved
    pub fn mark_scraped(&mut self, url: &str) -> bool {
        self.to_scrape.remove(url)
    }

    pub fn to_scrape(&self) -> &BTreeSet<String> {
        &self.to_scrape
    }

    /// Copy of `to_scrape` to iterate while the live set shrinks
    pub fn to_scrape_snapshot(&self) -> Vec<String> {
        self.to_scrape.iter().cloned().collect()
    }
}
