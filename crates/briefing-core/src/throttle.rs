//! Per-host request throttling for polite fetching.
//!
//! Wraps any [`Fetcher`] with a minimum interval between consecutive
//! requests to the same host. Aggregators ask scrapers to keep their
//! request rate low; the default interval is 30 seconds.
//!
//! With `leading` enabled (the default) the first request to a host also
//! waits the full interval, so a freshly built scraper always pauses once
//! before it touches the upstream site.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use briefing_core::throttle::{ThrottleConfig, ThrottledFetcher};
//!
//! # use briefing_core::traits::Fetcher;
//! # #[derive(Clone)] struct MyFetcher;
//! # impl Fetcher for MyFetcher {
//! #     async fn fetch(&self, _: &str) -> Result<String, briefing_core::AppError> { todo!() }
//! # }
//! let fetcher = ThrottledFetcher::new(MyFetcher, ThrottleConfig::new(Duration::from_secs(5)));
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use url::Url;

use crate::error::AppError;
use crate::traits::Fetcher;

/// Default interval between requests to the same host.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(30);

/// Configuration for the throttled fetcher.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Minimum interval between consecutive requests to the same host.
    pub delay: Duration,

    /// Also wait `delay` before the first request to a host.
    pub leading: bool,
}

impl ThrottleConfig {
    /// Create a config with the given interval and a leading pause.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            leading: true,
        }
    }

    /// Let the first request to each host through immediately.
    pub fn without_leading_delay(mut self) -> Self {
        self.leading = false;
        self
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}

/// A [`Fetcher`] wrapper that enforces a per-host minimum interval.
///
/// Each call reserves the next free slot for its host before sleeping, so
/// concurrent callers queue up one `delay` apart instead of all waking at
/// once. Sleeping happens outside the lock and is cancel-safe: dropping the
/// future abandons the wait.
#[derive(Clone)]
pub struct ThrottledFetcher<F> {
    inner: F,
    config: ThrottleConfig,
    /// Time of the latest (possibly future, reserved) request per host.
    last_request: Arc<Mutex<HashMap<String, Instant>>>,
}

impl<F: Fetcher> ThrottledFetcher<F> {
    /// Wrap an existing fetcher with throttling.
    pub fn new(inner: F, config: ThrottleConfig) -> Self {
        Self {
            inner,
            config,
            last_request: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Extract the host key from a URL (scheme://host:port).
    fn host_key(url_str: &str) -> Option<String> {
        let url = Url::parse(url_str).ok()?;
        let host = url.host_str()?;
        let port = url
            .port_or_known_default()
            .map(|p| format!(":{p}"))
            .unwrap_or_default();
        Some(format!("{}://{}{}", url.scheme(), host, port))
    }

    /// How long a request issued at `now` has to wait, given the previous
    /// request slot for its host.
    fn wait_time(&self, previous: Option<Instant>, now: Instant) -> Duration {
        match previous {
            Some(last) => (last + self.config.delay).saturating_duration_since(now),
            None if self.config.leading => self.config.delay,
            None => Duration::ZERO,
        }
    }

    async fn wait_for_host(&self, host: &str) {
        let now = Instant::now();
        let wait = {
            let mut map = self.last_request.lock().await;
            let wait = self.wait_time(map.get(host).copied(), now);
            map.insert(host.to_string(), now + wait);
            wait
        };

        if !wait.is_zero() {
            tracing::debug!(
                host = %host,
                sleep_ms = %wait.as_millis(),
                "Throttling request"
            );
            tokio::time::sleep(wait).await;
        }
    }
}

impl<F: Fetcher> Fetcher for ThrottledFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        if let Some(host) = Self::host_key(url) {
            self.wait_for_host(&host).await;
        }
        self.inner.fetch(url).await
    }
}
