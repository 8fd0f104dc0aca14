use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Vetharvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub crawler: CrawlerConfig,
    pub scraper: ScraperConfig,
    pub http: HttpConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Parses the site base URL
    pub fn base_url(&self) -> crate::UrlResult<url::Url> {
        crate::url::normalize_url(&self.site.base_url)
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Full path of the article corpus file
    pub fn corpus_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.corpus_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.log_dir)
    }
}

/// Target site description
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL every discovered link is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Start URLs used when the frontier is empty
    pub seeds: Vec<String>,

    /// Site-relative path prefixes that are never followed
    #[serde(rename = "skip-paths")]
    pub skip_paths: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.merckvetmanual.com/".to_string(),
            seeds: vec![
                "https://www.merckvetmanual.com/resourcespages/pet-owners-overview".to_string(),
                "https://www.merckvetmanual.com/veterinary-topics".to_string(),
            ],
            skip_paths: vec![
                "/resource".to_string(),
                "/authors".to_string(),
                "/reference-values-and-conversion-tables/reference-guides".to_string(),
                "/pages-with-widgets/quizzes".to_string(),
                "/resourcespages/about".to_string(),
                "/resourcespages/glossary".to_string(),
            ],
        }
    }
}

/// DOM selectors and marker attribute values for the target site
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Anchors considered for link discovery
    #[serde(rename = "link-anchors")]
    pub link_anchors: String,

    /// Marker element present only on content pages
    #[serde(rename = "main-content")]
    pub main_content: String,

    /// Article title element
    pub title: String,

    /// `data-testid` value of real body paragraphs
    #[serde(rename = "topic-paragraph-testid")]
    pub topic_paragraph_testid: String,

    /// Class fragment identifying figure blocks
    #[serde(rename = "figure-class")]
    pub figure_class: String,

    /// `data-testid` value of illustration blocks
    #[serde(rename = "illustrative-testid")]
    pub illustrative_testid: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            link_anchors: "#mainContainer a".to_string(),
            main_content: "[data-testid=\"topic-main-content\"]".to_string(),
            title: "h1".to_string(),
            topic_paragraph_testid: "topicPara".to_string(),
            figure_class: "Figure".to_string(),
            illustrative_testid: "baseillustrative".to_string(),
        }
    }
}

/// Crawl pacing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of successful requests between cooldowns
    #[serde(rename = "cooldown-every")]
    pub cooldown_every: u32,

    /// Cooldown duration (milliseconds)
    #[serde(rename = "cooldown-ms")]
    pub cooldown_ms: u64,
}

impl CrawlerConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            cooldown_every: 100,
            cooldown_ms: 10_000,
        }
    }
}

/// Growth policy for repeated cooldowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffPolicy {
    #[default]
    Fixed,
    Exponential,
}

/// Article scraping pacing and retry policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Wait before the single retry of a denied article (milliseconds)
    #[serde(rename = "denied-retry-ms")]
    pub denied_retry_ms: u64,

    /// Wait after a soft failure (milliseconds)
    #[serde(rename = "failure-cooldown-ms")]
    pub failure_cooldown_ms: u64,

    /// How consecutive failure cooldowns grow
    pub backoff: BackoffPolicy,

    /// Upper bound for an exponential failure cooldown (milliseconds)
    #[serde(rename = "max-failure-cooldown-ms")]
    pub max_failure_cooldown_ms: u64,
}

impl ScraperConfig {
    pub fn denied_retry(&self) -> Duration {
        Duration::from_millis(self.denied_retry_ms)
    }

    pub fn failure_cooldown(&self) -> Duration {
        Duration::from_millis(self.failure_cooldown_ms)
    }

    pub fn max_failure_cooldown(&self) -> Duration {
        Duration::from_millis(self.max_failure_cooldown_ms)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            denied_retry_ms: 180_000,
            failure_cooldown_ms: 10_000,
            backoff: BackoffPolicy::Fixed,
            max_failure_cooldown_ms: 300_000,
        }
    }
}

/// HTTP page driver settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Navigation timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; vetharvest/0.1)".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Where frontier files, the corpus and logs live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(rename = "data-dir")]
    pub data_dir: String,

    /// Corpus file name, relative to the data directory
    #[serde(rename = "corpus-file")]
    pub corpus_file: String,

    #[serde(rename = "log-dir")]
    pub log_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            corpus_file: "articles.json".to_string(),
            log_dir: "./logs".to_string(),
        }
    }
}
