use std::time::Duration;

use briefing_core::error::AppError;
use briefing_core::traits::Fetcher;
use reqwest::Client;

/// Identifies this scraper to the upstream site.
pub const USER_AGENT: &str = "Briefing/0.1 (news digest; research use)";

/// Default upper bound on a single page fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP fetcher using reqwest.
///
/// Downloads raw HTML with a fixed User-Agent and a bounded timeout.
/// Non-success statuses are errors; nothing is retried.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }

    /// The client timeout covers the body read too, so both phases share this.
    fn classify(&self, e: reqwest::Error, context: &str) -> AppError {
        if e.is_timeout() {
            AppError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            AppError::NetworkError(format!("Connection failed: {e}"))
        } else {
            AppError::HttpError(format!("{context}: {e}"))
        }
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e, "Request failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        tracing::debug!(status = status.as_u16(), %url, "Fetched page");

        response
            .text()
            .await
            .map_err(|e| self.classify(e, "Failed to read response body"))
    }
}
