//! Article harvester - scrapes queued content URLs into the corpus

use crate::articles::markdown::element_to_markdown;
use crate::articles::ArticleRecord;
use crate::config::{Config, ScraperConfig, SelectorConfig};
use crate::crawler::{pause, Backoff, StopReason};
use crate::page::{PageDriver, WaitCondition};
use crate::state::{Frontier, ShutdownFlag};
use crate::storage::{corpus_links, Storage};
use crate::url::normalize_on_site;
use crate::{HarvestError, Result};
use url::Url;

/// Summary of one scrape run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    /// URLs attempted in this run
    pub attempted: usize,
    /// Articles appended to the corpus
    pub saved: usize,
    /// URLs left in `to_scrape` after a soft failure
    pub failed: usize,
    /// URLs left in `to_scrape` after the run
    pub remaining: usize,
    /// Corpus size after the run
    pub corpus_size: usize,
    pub stop: StopReason,
}

/// Scrapes articles through a single page
pub struct Harvester<P, S> {
    page: P,
    storage: S,
    base_url: Url,
    selectors: SelectorConfig,
    scraper: ScraperConfig,
    backoff: Backoff,
    shutdown: ShutdownFlag,
}

impl<P: PageDriver, S: Storage> Harvester<P, S> {
    pub fn new(page: P, storage: S, config: &Config, shutdown: ShutdownFlag) -> Result<Self> {
        Ok(Self {
            page,
            storage,
            base_url: config.base_url()?,
            selectors: config.selectors.clone(),
            scraper: config.scraper.clone(),
            backoff: Backoff::from_scraper(&config.scraper),
            shutdown,
        })
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Scrapes every URL in `to_scrape` and appends the articles to the corpus
    ///
    /// Content URLs without a saved article are added to `to_scrape` first,
    /// then `extra_urls`. The
    /// queue and the new articles are saved before returning, including
    /// when access is denied.
    pub async fn run(&mut self, extra_urls: &[String]) -> Result<ScrapeReport> {
        let mut frontier = self.storage.load_frontier()?;
        let saved_links = corpus_links(&self.storage.load_corpus()?);
        let initialized = frontier.init_to_scrape(&saved_links);
        if initialized > 0 {
            tracing::info!("Queued {} content URLs for scraping", initialized);
        }

        for url in extra_urls {
            match normalize_on_site(url, &self.base_url) {
                Ok(url) => {
                    frontier.add_to_scrape(url.as_str());
                }
                Err(e) => tracing::warn!("Ignoring URL {}: {}", url, e),
            }
        }

        let mut batch = Vec::new();
        let mut report = ScrapeReport {
            attempted: 0,
            saved: 0,
            failed: 0,
            remaining: 0,
            corpus_size: 0,
            stop: StopReason::Exhausted,
        };

        let outcome = self.scrape_batch(&mut frontier, &mut batch, &mut report).await;
        let finalized = self.finalize(&mut frontier, &batch);
        report.remaining = frontier.to_scrape().len();

        match (outcome, finalized) {
            (Ok(stop), Ok(corpus_size)) => {
                report.stop = stop;
                report.saved = batch.len();
                report.corpus_size = corpus_size;
                tracing::info!(
                    "Scrape {}: {} of {} articles saved, {} failed, {} left",
                    stop,
                    report.saved,
                    report.attempted,
                    report.failed,
                    report.remaining
                );
                Ok(report)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), finalized) => {
                if let Err(save_error) = finalized {
                    tracing::error!("Failed to save scrape progress: {}", save_error);
                }
                Err(e)
            }
        }
    }

    async fn scrape_batch(
        &mut self,
        frontier: &mut Frontier,
        batch: &mut Vec<ArticleRecord>,
        report: &mut ScrapeReport,
    ) -> Result<StopReason> {
        let urls = frontier.to_scrape_snapshot();
        let total = urls.len();

        for (i, url) in urls.iter().enumerate() {
            if self.shutdown.is_triggered() {
                tracing::warn!("Scrape interrupted, saving progress");
                return Ok(StopReason::Interrupted);
            }

            tracing::info!("Scraping article {}/{}: {}", i + 1, total, url);
            report.attempted += 1;

            match self.scrape_article(url).await? {
                Some(article) => {
                    frontier.mark_scraped(url);
                    batch.push(article);
                }
                None => {
                    tracing::warn!("Failed to scrape article {}", i + 1);
                    report.failed += 1;
                }
            }
        }

        Ok(StopReason::Exhausted)
    }

    /// Scrapes one article
    ///
    /// Soft failures are logged, followed by the failure cooldown, and
    /// yield `None`. Only a repeated 403 is returned as an error.
    pub async fn scrape_article(&mut self, url: &str) -> Result<Option<ArticleRecord>> {
        match self.try_scrape(url).await {
            Ok(Some(article)) => {
                self.backoff.reset();
                Ok(Some(article))
            }
            Ok(None) => Ok(None),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                let cooldown = self.backoff.next_delay();
                tracing::warn!("Failed to scrape {}: {} (cooling down {:?})", url, e, cooldown);
                pause(cooldown).await;
                Ok(None)
            }
        }
    }

    async fn try_scrape(&mut self, url: &str) -> Result<Option<ArticleRecord>> {
        let mut navigation = self.navigate(url).await?;

        if navigation.is_forbidden() {
            let wait = self.scraper.denied_retry();
            tracing::warn!("HTTP 403 on {}, retrying once in {:?}", url, wait);
            pause(wait).await;

            navigation = self.navigate(url).await?;
            if navigation.is_forbidden() {
                tracing::error!("HTTP 403 again on {}, requests are being blocked", url);
                return Err(HarvestError::AccessDenied {
                    url: url.to_string(),
                });
            }
        }

        let title = match self.page.query_selector(&self.selectors.title)? {
            Some(heading) => heading.inner_text(),
            None => "Untitled".to_string(),
        };

        let Some(main_content) = self.page.query_selector(&self.selectors.main_content)? else {
            tracing::warn!("No main content found on {}", url);
            return Ok(None);
        };

        Ok(Some(ArticleRecord {
            name: title.trim().to_string(),
            link: url.to_string(),
            content: element_to_markdown(&main_content, &self.selectors),
        }))
    }

    async fn navigate(&mut self, url: &str) -> Result<crate::page::Navigation> {
        self.page
            .navigate(url, WaitCondition::DomContentLoaded)
            .await
            .map_err(|source| HarvestError::Fetch {
                url: url.to_string(),
                source,
            })
    }

    /// Appends the batch to the corpus, then saves the remaining queue
    ///
    /// If the corpus write fails the batch URLs go back into `to_scrape`
    /// before the queue is saved, so a URL only leaves the queue once its
    /// article is on disk.
    fn finalize(&mut self, frontier: &mut Frontier, batch: &[ArticleRecord]) -> Result<usize> {
        let corpus = self.storage.append_articles(batch);
        if corpus.is_err() {
            for article in batch {
                frontier.add_to_scrape(&article.link);
            }
        }

        let queue = self.storage.save_scrape_queue(frontier);
        let corpus_size = corpus?;
        queue?;
        Ok(corpus_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fake::FakeSite;
    use crate::storage::FileStorage;
    use tempfile::TempDir;

    const SITE: &str = "https://vet.example/";

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.site.base_url = SITE.to_string();
        config.scraper.denied_retry_ms = 0;
        config.scraper.failure_cooldown_ms = 0;
        config.storage.data_dir = dir.path().join("data").to_string_lossy().into_owned();
        config
    }

    fn url(path: &str) -> String {
        format!("{}{}", SITE, path)
    }

    fn storage_with_queue(config: &Config, to_scrape: &[String]) -> FileStorage {
        let mut storage = FileStorage::open(&config.data_dir(), &config.corpus_path()).unwrap();
        storage
            .save_scrape_queue(&Frontier::from_parts(
                vec![],
                vec![],
                vec![],
                to_scrape.to_vec(),
            ))
            .unwrap();
        storage
    }

    fn article(title: &str, body: &str) -> String {
        format!(
            r#"<h1> {} </h1>
               <div data-testid="topic-main-content">
                 <h2>Overview</h2>
                 <p data-testid="topicPara">{}</p>
               </div>"#,
            title, body
        )
    }

    #[tokio::test]
    async fn test_soft_failure_keeps_url_queued() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let urls = vec![url("1"), url("2"), url("3")];
        let site = FakeSite::new()
            .page(&url("1"), &article("One", "First"))
            .fail(&url("2"))
            .page(&url("3"), &article("Three", "Third"));

        let mut harvester =
            Harvester::new(site, storage_with_queue(&config, &urls), &config, ShutdownFlag::new())
                .unwrap();
        let report = harvester.run(&[]).await.unwrap();

        assert_eq!(report.attempted, 3);
        assert_eq!(report.saved, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.corpus_size, 2);

        let frontier = harvester.storage().load_frontier().unwrap();
        assert_eq!(frontier.to_scrape_snapshot(), vec![url("2")]);

        let corpus = harvester.storage().load_corpus().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0]["name"], "One");
        assert_eq!(corpus[0]["link"], url("1"));
        assert_eq!(corpus[0]["content"], "## Overview\nFirst");
    }

    #[tokio::test]
    async fn test_denied_once_then_retried() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let site = FakeSite::new()
            .status(&url("1"), 403)
            .page(&url("1"), &article("One", "First"));

        let mut harvester = Harvester::new(
            site,
            storage_with_queue(&config, &[url("1")]),
            &config,
            ShutdownFlag::new(),
        )
        .unwrap();
        let report = harvester.run(&[]).await.unwrap();

        assert_eq!(report.saved, 1);
        assert_eq!(harvester.page().visit_count(&url("1")), 2);
    }

    #[tokio::test]
    async fn test_denied_twice_aborts_after_saving() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let site = FakeSite::new()
            .page(&url("a"), &article("A", "Alpha"))
            .status(&url("b"), 403)
            .page(&url("c"), &article("C", "Gamma"));

        let urls = vec![url("a"), url("b"), url("c")];
        let mut harvester =
            Harvester::new(site, storage_with_queue(&config, &urls), &config, ShutdownFlag::new())
                .unwrap();
        let result = harvester.run(&[]).await;

        assert!(matches!(result, Err(HarvestError::AccessDenied { .. })));
        assert_eq!(harvester.page().visit_count(&url("b")), 2);
        assert_eq!(harvester.page().visit_count(&url("c")), 0);

        let frontier = harvester.storage().load_frontier().unwrap();
        assert_eq!(frontier.to_scrape_snapshot(), vec![url("b"), url("c")]);
        assert_eq!(harvester.storage().load_corpus().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_corpus_write_keeps_urls_queued() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let site = FakeSite::new()
            .page(&url("1"), &article("One", "First"))
            .fail(&url("2"));

        let storage = storage_with_queue(&config, &[url("1"), url("2")]);
        let mut tmp_name = config.corpus_path().into_os_string();
        tmp_name.push(".tmp");
        std::fs::create_dir_all(&tmp_name).unwrap();

        let mut harvester = Harvester::new(site, storage, &config, ShutdownFlag::new()).unwrap();
        let result = harvester.run(&[]).await;

        assert!(matches!(result, Err(HarvestError::Storage(_))));
        assert!(harvester.storage().load_corpus().unwrap().is_empty());

        let frontier = harvester.storage().load_frontier().unwrap();
        assert_eq!(frontier.to_scrape_snapshot(), vec![url("1"), url("2")]);
    }

    #[tokio::test]
    async fn test_missing_main_content_is_soft() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let site = FakeSite::new().page(&url("hub"), "<h1>Hub</h1><p>No article here</p>");

        let mut harvester = Harvester::new(
            site,
            storage_with_queue(&config, &[url("hub")]),
            &config,
            ShutdownFlag::new(),
        )
        .unwrap();
        let report = harvester.run(&[]).await.unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.remaining, 1);
    }

    #[tokio::test]
    async fn test_untitled_fallback() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let site = FakeSite::new().page(
            &url("x"),
            r#"<div data-testid="topic-main-content"><p data-testid="topicPara">Body</p></div>"#,
        );

        let mut harvester =
            Harvester::new(site, storage_with_queue(&config, &[]), &config, ShutdownFlag::new())
                .unwrap();
        let article = harvester.scrape_article(&url("x")).await.unwrap().unwrap();
        assert_eq!(article.name, "Untitled");
        assert_eq!(article.content, "Body");
    }

    #[tokio::test]
    async fn test_queue_initialized_from_content_urls() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let mut storage = FileStorage::open(&config.data_dir(), &config.corpus_path()).unwrap();

        let mut frontier = Frontier::new();
        frontier.record_content(&url("old"));
        frontier.record_content(&url("new"));
        storage.save_crawl_state(&frontier).unwrap();
        storage
            .append_articles(&[ArticleRecord {
                name: "Old".to_string(),
                link: url("old"),
                content: String::new(),
            }])
            .unwrap();

        let site = FakeSite::new().page(&url("new"), &article("New", "Fresh"));
        let mut harvester = Harvester::new(site, storage, &config, ShutdownFlag::new()).unwrap();
        let report = harvester.run(&[]).await.unwrap();

        assert_eq!(report.attempted, 1);
        assert_eq!(report.corpus_size, 2);
        assert_eq!(harvester.page().visit_count(&url("old")), 0);
    }

    #[tokio::test]
    async fn test_new_content_scraped_despite_stuck_url() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let mut storage = FileStorage::open(&config.data_dir(), &config.corpus_path()).unwrap();

        let mut frontier = Frontier::new();
        frontier.record_content(&url("broken"));
        storage.save_crawl_state(&frontier).unwrap();

        let site = FakeSite::new().page(&url("broken"), "<h1>Moved</h1>");
        let mut harvester = Harvester::new(site, storage, &config, ShutdownFlag::new()).unwrap();
        let first = harvester.run(&[]).await.unwrap();
        assert_eq!(first.failed, 1);

        // A later crawl records another content page
        let mut storage = harvester.storage().clone();
        let mut frontier = storage.load_frontier().unwrap();
        frontier.record_content(&url("fresh"));
        storage.save_crawl_state(&frontier).unwrap();

        let site = FakeSite::new()
            .page(&url("broken"), "<h1>Moved</h1>")
            .page(&url("fresh"), &article("Fresh", "New"));
        let mut harvester = Harvester::new(site, storage, &config, ShutdownFlag::new()).unwrap();
        let second = harvester.run(&[]).await.unwrap();

        assert_eq!(second.attempted, 2);
        assert_eq!(second.saved, 1);
        assert_eq!(harvester.page().visit_count(&url("fresh")), 1);

        let frontier = harvester.storage().load_frontier().unwrap();
        assert_eq!(frontier.to_scrape_snapshot(), vec![url("broken")]);
    }

    #[tokio::test]
    async fn test_interrupt_before_first_url() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let shutdown = ShutdownFlag::new();
        shutdown.trigger();

        let mut harvester = Harvester::new(
            FakeSite::new(),
            storage_with_queue(&config, &[url("1")]),
            &config,
            shutdown,
        )
        .unwrap();
        let report = harvester.run(&[url("2")]).await.unwrap();

        assert_eq!(report.stop, StopReason::Interrupted);
        assert_eq!(report.attempted, 0);
        assert_eq!(report.remaining, 2);
        assert!(harvester.page().visits.is_empty());
    }
}
