//! Configuration module for Vetharvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults describing the target site, so an empty file
//! (or no file at all) is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use vetharvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("vetharvest.toml")).unwrap();
//! println!("Crawling {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    BackoffPolicy, Config, CrawlerConfig, HttpConfig, ScraperConfig, SelectorConfig, SiteConfig,
    StorageConfig,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
