//! State module for tracking crawl and scrape progress
//!
//! # Components
//!
//! - `PageState`: what happened to a URL during a crawl
//! - `Frontier`: the persisted URL sets shared by the crawler and the scraper
//! - `ShutdownFlag`: cooperative cancellation checked between URLs

mod frontier;
mod page_state;
mod shutdown;

pub use frontier::Frontier;
pub use page_state::PageState;
pub use shutdown::ShutdownFlag;
