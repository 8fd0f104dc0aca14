//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that classifies every reachable
//! site URL as a content page or a hub:
//! - Loading and seeding the frontier
//! - Visiting one URL at a time through a [`PageDriver`]
//! - Expanding hubs through the link extractor
//! - Pacing requests
//! - Persisting the frontier on every exit path

use crate::config::{Config, SelectorConfig};
use crate::crawler::links::extract_links;
use crate::crawler::throttle::{pause, RequestThrottle};
use crate::page::{PageDriver, WaitCondition};
use crate::state::{Frontier, PageState, ShutdownFlag};
use crate::storage::Storage;
use crate::url::{normalize_on_site, ExcludedPaths};
use crate::{HarvestError, Result};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Why a run loop ended without a fatal error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The work queue ran dry
    Exhausted,
    /// The shutdown flag was raised
    Interrupted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "exhausted"),
            Self::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Summary of one crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Final state of every URL handled in this run
    pub states: BTreeMap<PageState, usize>,
    /// Successful navigations
    pub requests: u64,
    /// URLs newly added to `to_explore`
    pub discovered: usize,
    /// URLs left in `to_explore`
    pub remaining: usize,
    pub stop: StopReason,
}

impl CrawlReport {
    fn new() -> Self {
        Self {
            states: BTreeMap::new(),
            requests: 0,
            discovered: 0,
            remaining: 0,
            stop: StopReason::Exhausted,
        }
    }

    fn record(&mut self, state: PageState) {
        *self.states.entry(state).or_insert(0) += 1;
    }

    /// Number of URLs that ended in `state`
    pub fn count(&self, state: PageState) -> usize {
        self.states.get(&state).copied().unwrap_or(0)
    }
}

/// Drives the crawl of one site through a single page
pub struct Crawler<P, S> {
    page: P,
    storage: S,
    base_url: Url,
    seeds: Vec<String>,
    selectors: SelectorConfig,
    excluded: ExcludedPaths,
    throttle: RequestThrottle,
    shutdown: ShutdownFlag,
}

impl<P: PageDriver, S: Storage> Crawler<P, S> {
    /// Creates a crawler over an exclusively owned page and storage
    pub fn new(page: P, storage: S, config: &Config, shutdown: ShutdownFlag) -> Result<Self> {
        Ok(Self {
            page,
            storage,
            base_url: config.base_url()?,
            seeds: config.site.seeds.clone(),
            selectors: config.selectors.clone(),
            excluded: ExcludedPaths::new(config.site.skip_paths.clone()),
            throttle: RequestThrottle::new(&config.crawler),
            shutdown,
        })
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Runs the crawl until the frontier drains, a stop is requested, or
    /// the site denies access
    ///
    /// `start_urls` are queued before the loop; when none are given and
    /// nothing is queued, the configured seeds are used. The frontier is
    /// saved before returning, including when access is denied.
    pub async fn run(&mut self, start_urls: &[String]) -> Result<CrawlReport> {
        let mut frontier = self.storage.load_frontier()?;
        self.seed(&mut frontier, start_urls);

        tracing::info!(
            "Starting crawl: {} to explore, {} visited, {} content URLs",
            frontier.to_explore().len(),
            frontier.visited().len(),
            frontier.content_urls().len()
        );

        let mut report = CrawlReport::new();
        let outcome = self.crawl_loop(&mut frontier, &mut report).await;
        let saved = self.finalize(&mut frontier);
        report.remaining = frontier.to_explore().len();

        match (outcome, saved) {
            (Ok(stop), Ok(())) => {
                report.stop = stop;
                tracing::info!(
                    "Crawl {}: {} requests, {} content, {} hubs, {} dropped, {} left to explore",
                    stop,
                    report.requests,
                    report.count(PageState::VisitedContent),
                    report.count(PageState::VisitedHub),
                    report.count(PageState::Dropped),
                    report.remaining
                );
                Ok(report)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), saved) => {
                if let Err(save_error) = saved {
                    tracing::error!("Failed to save crawl state: {}", save_error);
                }
                Err(e)
            }
        }
    }

    fn seed(&self, frontier: &mut Frontier, start_urls: &[String]) {
        let mut added = 0;
        for url in start_urls {
            match normalize_on_site(url, &self.base_url) {
                Ok(url) => {
                    frontier.requeue(url.as_str());
                    added += 1;
                }
                Err(e) => tracing::warn!("Ignoring start URL {}: {}", url, e),
            }
        }

        if added == 0 && frontier.to_explore().is_empty() {
            tracing::info!("Frontier is empty, seeding with {} URLs", self.seeds.len());
            for seed in &self.seeds {
                frontier.requeue(seed);
            }
        }
    }

    async fn crawl_loop(
        &mut self,
        frontier: &mut Frontier,
        report: &mut CrawlReport,
    ) -> Result<StopReason> {
        loop {
            if self.shutdown.is_triggered() {
                tracing::warn!("Crawl interrupted, saving progress");
                return Ok(StopReason::Interrupted);
            }

            let Some(url) = frontier.pop_to_explore() else {
                tracing::info!("Frontier is empty, crawl complete");
                return Ok(StopReason::Exhausted);
            };

            if frontier.is_visited(&url) {
                continue;
            }

            tracing::debug!("{} URLs to explore", frontier.to_explore().len() + 1);
            match self.visit(frontier, &url, report).await {
                Ok(state) => report.record(state),
                Err(e) if e.is_fatal() => {
                    report.record(PageState::SkippedDenied);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("Failed to classify {}: {}", url, e);
                    report.record(PageState::Dropped);
                }
            }
        }
    }

    /// Fetches and classifies one URL
    async fn visit(
        &mut self,
        frontier: &mut Frontier,
        url: &str,
        report: &mut CrawlReport,
    ) -> Result<PageState> {
        advance(PageState::Queued, PageState::Visiting);
        tracing::info!("Visiting: {}", url);

        let navigation = match self.page.navigate(url, WaitCondition::DomContentLoaded).await {
            Ok(navigation) => navigation,
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", url, e);
                return Ok(advance(PageState::Visiting, PageState::Dropped));
            }
        };

        if navigation.is_forbidden() {
            tracing::error!("HTTP 403 on {}, requests are being blocked", url);
            frontier.requeue(url);
            return Err(HarvestError::AccessDenied {
                url: url.to_string(),
            });
        }

        frontier.mark_visited(url);
        report.requests += 1;
        if let Some(cooldown) = self.throttle.record_request() {
            tracing::info!(
                "Requests made: {}, sleeping for {:?}",
                self.throttle.request_count(),
                cooldown
            );
            pause(cooldown).await;
        }

        if self.page.query_selector(&self.selectors.main_content)?.is_some() {
            tracing::info!("Content found at: {}", url);
            frontier.record_content(url);
            return Ok(advance(PageState::Visiting, PageState::VisitedContent));
        }

        let links = extract_links(&self.page, &self.base_url, &self.selectors, &self.excluded)?;
        let added = frontier.enqueue_discovered(links.iter().map(String::as_str));
        report.discovered += added;
        tracing::info!(
            "No main content on {}, queued {} of {} links",
            url,
            added,
            links.len()
        );

        Ok(advance(PageState::Visiting, PageState::VisitedHub))
    }

    fn finalize(&mut self, frontier: &mut Frontier) -> Result<()> {
        self.storage.save_crawl_state(frontier)?;
        tracing::info!(
            "Progress saved: {} to explore, {} visited, {} new content URLs",
            frontier.to_explore().len(),
            frontier.visited().len(),
            frontier.new_content().len()
        );
        frontier.clear_new_content();
        Ok(())
    }
}

fn advance(from: PageState, to: PageState) -> PageState {
    debug_assert!(from.can_transition_to(to), "{} -> {}", from, to);
    to
}
