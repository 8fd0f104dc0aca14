//! Page capability used by the crawler and the article scraper
//!
//! The crawl and scrape loops only ever need to navigate to a URL, learn
//! the response status, and query the resulting DOM. That surface is the
//! [`PageDriver`] trait; [`HttpPage`] is the production implementation.
//!
//! - `dom`: owned, read-only DOM snapshots and selector queries
//! - `http`: reqwest-backed driver

mod dom;
#[cfg(test)]
pub(crate) mod fake;
mod http;

pub use dom::{parse_selector, query_all, query_first, DomChild, DomNode};
pub use http::{build_http_client, HttpPage};

use thiserror::Error;

/// Navigation barrier requested from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitCondition {
    /// Return once the document has been parsed; lazy content may be absent
    #[default]
    DomContentLoaded,
}

/// Outcome of a completed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// HTTP status code of the main document
    pub status: u16,
    /// URL after redirects
    pub final_url: String,
}

impl Navigation {
    /// Returns true if the site refused access
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }
}

/// Errors raised by a page driver
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("navigation timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("no page has been loaded")]
    NotNavigated,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// A single browser-like page, exclusively owned by one crawl or scrape loop
///
/// Queries operate on the document loaded by the most recent successful
/// [`navigate`](PageDriver::navigate) call.
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    /// Loads `url` and waits for the given barrier
    ///
    /// Any HTTP status counts as a completed navigation; only transport
    /// failures and timeouts are errors.
    async fn navigate(&mut self, url: &str, wait: WaitCondition) -> Result<Navigation, FetchError>;

    /// Returns the first element matching `selector`
    fn query_selector(&self, selector: &str) -> crate::Result<Option<DomNode>>;

    /// Returns every element matching `selector`, in document order
    fn query_selector_all(&self, selector: &str) -> crate::Result<Vec<DomNode>>;
}
