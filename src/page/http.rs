//! HTTP page driver
//!
//! Fetches documents with reqwest and answers DOM queries by parsing the
//! stored body with `scraper`. The target site renders its article markup
//! server-side, so the fetched document is what a browser sees at
//! DOMContentLoaded.

use crate::config::HttpConfig;
use crate::page::dom::{query_all, query_first, DomNode};
use crate::page::{FetchError, Navigation, PageDriver, WaitCondition};
use reqwest::Client;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use vetharvest::config::HttpConfig;
/// use vetharvest::page::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Document kept from the last navigation
#[derive(Debug)]
struct LoadedDocument {
    url: String,
    body: String,
}

/// Single-tab page backed by plain HTTP requests
#[derive(Debug)]
pub struct HttpPage {
    client: Client,
    document: Option<LoadedDocument>,
}

impl HttpPage {
    /// Creates a page with a freshly built client
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            document: None,
        }
    }

    /// URL of the currently loaded document
    pub fn current_url(&self) -> Option<&str> {
        self.document.as_ref().map(|doc| doc.url.as_str())
    }

    fn body(&self) -> Result<&str, FetchError> {
        self.document
            .as_ref()
            .map(|doc| doc.body.as_str())
            .ok_or(FetchError::NotNavigated)
    }
}

impl PageDriver for HttpPage {
    async fn navigate(&mut self, url: &str, wait: WaitCondition) -> Result<Navigation, FetchError> {
        // A failed navigation must not leave the previous page queryable
        self.document = None;

        tracing::trace!("GET {} ({:?})", url, wait);
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        self.document = Some(LoadedDocument {
            url: final_url.clone(),
            body,
        });

        Ok(Navigation { status, final_url })
    }

    fn query_selector(&self, selector: &str) -> crate::Result<Option<DomNode>> {
        query_first(self.body()?, selector)
    }

    fn query_selector_all(&self, selector: &str) -> crate::Result<Vec<DomNode>> {
        query_all(self.body()?, selector)
    }
}
