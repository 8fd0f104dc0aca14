//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small site and run the full crawl
//! cycle through the HTTP page driver.

use crate::{article_page, hub_page, test_config};
use tempfile::TempDir;
use vetharvest::crawler::{crawl, StopReason};
use vetharvest::state::{PageState, ShutdownFlag};
use vetharvest::storage::{open_storage, Storage};
use vetharvest::HarvestError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, status: u16, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);

    serve(&server, "/hub", 200, hub_page(&["/dogs", "/cats#top", "/authors/smith"]), 1).await;
    serve(&server, "/dogs", 200, hub_page(&["/dogs/fleas", "/hub"]), 1).await;
    serve(&server, "/cats", 200, article_page("Cats", "Cats purr."), 1).await;
    serve(&server, "/dogs/fleas", 200, article_page("Fleas", "Fleas bite."), 1).await;
    serve(&server, "/authors/smith", 200, String::new(), 0).await;
    serve(&server, "/header-only", 200, String::new(), 0).await;

    let report = crawl(&config, &[], ShutdownFlag::new()).await.unwrap();

    assert_eq!(report.stop, StopReason::Exhausted);
    assert_eq!(report.requests, 4);
    assert_eq!(report.count(PageState::VisitedHub), 2);
    assert_eq!(report.count(PageState::VisitedContent), 2);

    let storage = open_storage(&config.data_dir(), &config.corpus_path()).unwrap();
    let frontier = storage.load_frontier().unwrap();
    let base = server.uri();
    assert!(frontier.content_urls().contains(&format!("{}/cats", base)));
    assert!(frontier.content_urls().contains(&format!("{}/dogs/fleas", base)));
    assert_eq!(frontier.visited().len(), 4);
    assert!(frontier.to_explore().is_empty());
}

#[tokio::test]
async fn test_crawl_resumes_after_access_denied() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);
    let base = server.uri();

    serve(&server, "/hub", 200, hub_page(&["/blocked"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/blocked"))
        .respond_with(ResponseTemplate::new(403))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    serve(&server, "/blocked", 200, article_page("Blocked", "Now allowed."), 1).await;

    let result = crawl(&config, &[], ShutdownFlag::new()).await;
    assert!(matches!(result, Err(HarvestError::AccessDenied { .. })));

    let storage = open_storage(&config.data_dir(), &config.corpus_path()).unwrap();
    let frontier = storage.load_frontier().unwrap();
    assert!(frontier.is_visited(&format!("{}/hub", base)));
    assert!(frontier.to_explore().contains(&format!("{}/blocked", base)));

    // The second run picks up the re-queued URL and never refetches the hub
    let report = crawl(&config, &[], ShutdownFlag::new()).await.unwrap();
    assert_eq!(report.count(PageState::VisitedContent), 1);

    let frontier = storage.load_frontier().unwrap();
    assert!(frontier.content_urls().contains(&format!("{}/blocked", base)));
    assert!(frontier.to_explore().is_empty());
}

#[tokio::test]
async fn test_unreachable_page_is_dropped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, &dir);
    config.site.seeds = vec![
        format!("{}/hub", server.uri()),
        "http://127.0.0.1:9/closed".to_string(),
    ];

    serve(&server, "/hub", 200, hub_page(&[]), 1).await;

    let report = crawl(&config, &[], ShutdownFlag::new()).await.unwrap();
    assert_eq!(report.count(PageState::VisitedHub), 1);
    assert_eq!(report.count(PageState::Dropped), 1);

    let storage = open_storage(&config.data_dir(), &config.corpus_path()).unwrap();
    let frontier = storage.load_frontier().unwrap();
    assert_eq!(frontier.visited().len(), 1);
    assert!(frontier.to_explore().is_empty());
}
