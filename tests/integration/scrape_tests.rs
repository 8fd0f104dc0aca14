//! Integration tests for the article scraper

use crate::{article_page, test_config};
use tempfile::TempDir;
use vetharvest::articles::scrape;
use vetharvest::crawler::StopReason;
use vetharvest::output::render_outline;
use vetharvest::state::{Frontier, ShutdownFlag};
use vetharvest::storage::{open_storage, Storage};
use vetharvest::HarvestError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn queue_content(config: &vetharvest::config::Config, urls: &[String]) {
    let mut storage = open_storage(&config.data_dir(), &config.corpus_path()).unwrap();
    let mut frontier = Frontier::new();
    for url in urls {
        frontier.mark_visited(url);
        frontier.record_content(url);
    }
    storage.save_crawl_state(&frontier).unwrap();
}

#[tokio::test]
async fn test_scrape_builds_corpus() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/fleas"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page("Fleas", "Fleas bite.")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Moved</h1>"))
        .mount(&server)
        .await;

    queue_content(&config, &[format!("{}/fleas", base), format!("{}/broken", base)]);

    let report = scrape(&config, &[], ShutdownFlag::new()).await.unwrap();
    assert_eq!(report.stop, StopReason::Exhausted);
    assert_eq!(report.saved, 1);
    assert_eq!(report.failed, 1);

    let storage = open_storage(&config.data_dir(), &config.corpus_path()).unwrap();
    let corpus = storage.load_corpus().unwrap();
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0]["name"], "Fleas");
    assert_eq!(corpus[0]["link"], format!("{}/fleas", base));
    assert_eq!(
        corpus[0]["content"],
        "Fleas bite.\n\n## Diagnosis\nPhysical exam."
    );

    let frontier = storage.load_frontier().unwrap();
    assert_eq!(frontier.to_scrape_snapshot(), vec![format!("{}/broken", base)]);

    assert!(render_outline(&corpus).contains("    📂 Diagnosis"));

    let logs: Vec<_> = std::fs::read_dir(dir.path().join("logs")).unwrap().collect();
    assert_eq!(logs.len(), 1);
}

#[tokio::test]
async fn test_scrape_retries_denied_article_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);

    Mock::given(method("GET"))
        .and(path("/fleas"))
        .respond_with(ResponseTemplate::new(403))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fleas"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page("Fleas", "Fleas bite.")))
        .expect(1)
        .mount(&server)
        .await;

    let report = scrape(&config, &[format!("{}/fleas", server.uri())], ShutdownFlag::new())
        .await
        .unwrap();
    assert_eq!(report.saved, 1);
    assert_eq!(report.remaining, 0);
}

#[tokio::test]
async fn test_scrape_denied_twice_saves_progress() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page("A", "First.")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(403))
        .expect(2)
        .mount(&server)
        .await;

    queue_content(&config, &[format!("{}/a", base), format!("{}/b", base)]);

    let result = scrape(&config, &[], ShutdownFlag::new()).await;
    assert!(matches!(result, Err(HarvestError::AccessDenied { .. })));

    let storage = open_storage(&config.data_dir(), &config.corpus_path()).unwrap();
    assert_eq!(storage.load_corpus().unwrap().len(), 1);
    assert_eq!(
        storage.load_frontier().unwrap().to_scrape_snapshot(),
        vec![format!("{}/b", base)]
    );
}
