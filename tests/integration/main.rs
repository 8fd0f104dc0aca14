//! End-to-end tests against a mocked site

mod crawl_tests;
mod scrape_tests;

use tempfile::TempDir;
use vetharvest::config::Config;
use wiremock::MockServer;

/// Configuration pointing at the mock server with all waits disabled
pub fn test_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/", server.uri());
    config.site.seeds = vec![format!("{}/hub", server.uri())];
    config.site.skip_paths = vec!["/authors".to_string()];
    config.crawler.cooldown_ms = 0;
    config.scraper.denied_retry_ms = 0;
    config.scraper.failure_cooldown_ms = 0;
    config.http.timeout_ms = 5_000;
    config.storage.data_dir = dir.path().join("data").to_string_lossy().into_owned();
    config.storage.log_dir = dir.path().join("logs").to_string_lossy().into_owned();
    config
}

/// A hub page linking to `hrefs` from the main container
pub fn hub_page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a href="{}">link</a></li>"#, href))
        .collect();
    format!(
        r#"<html><body>
             <header><a href="/header-only">Header</a></header>
             <div id="mainContainer"><ul>{}</ul></div>
           </body></html>"#,
        anchors
    )
}

/// An article page with a title, one section and a figure
pub fn article_page(title: &str, body: &str) -> String {
    format!(
        r#"<html><body><div id="mainContainer">
             <h1>{}</h1>
             <div data-testid="topic-main-content">
               <p data-testid="topicPara">{}</p>
               <section>
                 <h2>Diagnosis</h2>
                 <p data-testid="topicPara">Physical exam.</p>
                 <div class="Figure"><p data-testid="topicPara">Figure caption</p></div>
               </section>
             </div>
           </div></body></html>"#,
        title, body
    )
}
