use crate::config::types::{Config, CrawlerConfig, HttpConfig, ScraperConfig, SelectorConfig, SiteConfig};
use crate::url::{normalize_url, same_site};
use crate::ConfigError;
use scraper::Selector;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_selector_config(&config.selectors)?;
    validate_crawler_config(&config.crawler)?;
    validate_scraper_config(&config.scraper)?;
    validate_http_config(&config.http)?;
    validate_storage_config(config)?;
    Ok(())
}

/// Validates the base URL, seeds and skip paths
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = normalize_url(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    for seed in &config.seeds {
        let url = normalize_url(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if !same_site(&url, &base) {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' is not on site {}",
                seed, base
            )));
        }
    }

    for path in &config.skip_paths {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "skip path '{}' must start with '/'",
                path
            )));
        }
    }

    Ok(())
}

/// Validates that every selector parses and every marker is set
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (name, selector) in [
        ("link-anchors", &config.link_anchors),
        ("main-content", &config.main_content),
        ("title", &config.title),
    ] {
        Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("{} '{}': {:?}", name, selector, e))
        })?;
    }

    for (name, value) in [
        ("topic-paragraph-testid", &config.topic_paragraph_testid),
        ("figure-class", &config.figure_class),
        ("illustrative-testid", &config.illustrative_testid),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.cooldown_every < 1 {
        return Err(ConfigError::Validation(format!(
            "cooldown-every must be >= 1, got {}",
            config.cooldown_every
        )));
    }

    Ok(())
}

fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_failure_cooldown_ms < config.failure_cooldown_ms {
        return Err(ConfigError::Validation(format!(
            "max-failure-cooldown-ms ({}) must be >= failure-cooldown-ms ({})",
            config.max_failure_cooldown_ms, config.failure_cooldown_ms
        )));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "timeout-ms must be >= 100ms, got {}ms",
            config.timeout_ms
        )));
    }

    Ok(())
}

fn validate_storage_config(config: &Config) -> Result<(), ConfigError> {
    if config.storage.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "data-dir cannot be empty".to_string(),
        ));
    }

    if config.storage.corpus_file.is_empty() {
        return Err(ConfigError::Validation(
            "corpus-file cannot be empty".to_string(),
        ));
    }

    Ok(())
}
