//! Output module for reports over saved data
//!
//! This module handles:
//! - Outlining the section structure of saved articles
//! - Summarizing the persisted frontier

pub mod outline;
pub mod stats;

pub use outline::{build_article_outline, render_outline, write_outline, DEFAULT_OUTLINE_FILE};
pub use stats::{load_statistics, print_statistics, FrontierStatistics};
