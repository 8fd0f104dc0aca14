//! In-memory page driver for unit tests

use crate::page::dom::{query_all, query_first, DomNode};
use crate::page::{FetchError, Navigation, PageDriver, WaitCondition};
use std::collections::{HashMap, VecDeque};

/// Scripted response for one navigation
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Page { status: u16, html: String },
    Fail(FetchError),
}

/// Serves canned documents by URL
///
/// A URL may have a queue of responses; the last one repeats forever.
#[derive(Debug, Default)]
pub(crate) struct FakeSite {
    routes: HashMap<String, VecDeque<Scripted>>,
    current: Option<String>,
    pub visits: Vec<String>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.push(url, Scripted::Page {
            status: 200,
            html: html.to_string(),
        });
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.push(url, Scripted::Page {
            status,
            html: String::new(),
        });
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.push(url, Scripted::Fail(FetchError::Timeout(url.to_string())));
        self
    }

    fn push(&mut self, url: &str, response: Scripted) {
        self.routes.entry(url.to_string()).or_default().push_back(response);
    }

    pub fn visit_count(&self, url: &str) -> usize {
        self.visits.iter().filter(|v| v.as_str() == url).count()
    }

    fn body(&self) -> Result<&str, FetchError> {
        self.current.as_deref().ok_or(FetchError::NotNavigated)
    }
}

impl PageDriver for FakeSite {
    async fn navigate(&mut self, url: &str, _wait: WaitCondition) -> Result<Navigation, FetchError> {
        self.visits.push(url.to_string());
        self.current = None;

        let queue = self
            .routes
            .get_mut(url)
            .ok_or_else(|| FetchError::Network(format!("no route for {}", url)))?;
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        match response {
            Some(Scripted::Page { status, html }) => {
                self.current = Some(html);
                Ok(Navigation {
                    status,
                    final_url: url.to_string(),
                })
            }
            Some(Scripted::Fail(e)) => Err(e),
            None => Err(FetchError::Network(format!("no route for {}", url))),
        }
    }

    fn query_selector(&self, selector: &str) -> crate::Result<Option<DomNode>> {
        query_first(self.body()?, selector)
    }

    fn query_selector_all(&self, selector: &str) -> crate::Result<Vec<DomNode>> {
        query_all(self.body()?, selector)
    }
}
