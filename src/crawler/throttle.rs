//! Request pacing
//!
//! Two crude, non-adaptive policies:
//! - [`RequestThrottle`]: a fixed cooldown after every N successful requests
//! - [`Backoff`]: a cooldown after each soft failure, fixed or doubling

use crate::config::{BackoffPolicy, CrawlerConfig, ScraperConfig};
use std::time::Duration;

/// Counts successful requests and asks for a cooldown every `every` of them
#[derive(Debug, Clone)]
pub struct RequestThrottle {
    every: u32,
    cooldown: Duration,
    request_count: u64,
}

impl RequestThrottle {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            every: config.cooldown_every.max(1),
            cooldown: config.cooldown(),
            request_count: 0,
        }
    }

    /// Records one request; returns the pause owed after it, if any
    pub fn record_request(&mut self) -> Option<Duration> {
        self.request_count += 1;
        if self.request_count % u64::from(self.every) == 0 {
            Some(self.cooldown)
        } else {
            None
        }
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }
}

/// Cooldown after consecutive soft failures
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: BackoffPolicy,
    base: Duration,
    max: Duration,
    consecutive_failures: u32,
}

impl Backoff {
    pub fn new(policy: BackoffPolicy, base: Duration, max: Duration) -> Self {
        Self {
            policy,
            base,
            max: max.max(base),
            consecutive_failures: 0,
        }
    }

    pub fn from_scraper(config: &ScraperConfig) -> Self {
        Self::new(
            config.backoff,
            config.failure_cooldown(),
            config.max_failure_cooldown(),
        )
    }

    /// Records a failure and returns how long to wait before continuing
    ///
    /// Exponential delays double per consecutive failure and are capped.
    pub fn next_delay(&mut self) -> Duration {
        let exponent = self.consecutive_failures.min(31);
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);

        match self.policy {
            BackoffPolicy::Fixed => self.base,
            BackoffPolicy::Exponential => self
                .base
                .checked_mul(1u32 << exponent)
                .map_or(self.max, |delay| delay.min(self.max)),
        }
    }

    pub fn reset(&mut self) {
        self.consecutive_failures = 0;
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}

/// Sleeps for `duration`; zero returns immediately
pub async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
