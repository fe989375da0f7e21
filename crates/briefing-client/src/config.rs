use std::time::Duration;

use briefing_core::AppError;
use briefing_core::throttle::DEFAULT_REQUEST_DELAY;
use url::Url;

use crate::fetcher::DEFAULT_FETCH_TIMEOUT;
use crate::hacker_news::HACKER_NEWS_URL;

/// Configuration for the front-page scraper.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Front page to scrape; relative links resolve against it.
    pub source_url: String,
    /// Courtesy pause enforced before each fetch.
    pub request_delay: Duration,
    pub fetch_timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            source_url: HACKER_NEWS_URL.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl ScraperConfig {
    /// Read configuration from environment variables.
    ///
    /// - `BRIEFING_SOURCE_URL` (optional, defaults to Hacker News)
    /// - `BRIEFING_REQUEST_DELAY_SECS` (optional, defaults to 30; 0 disables)
    /// - `BRIEFING_FETCH_TIMEOUT_SECS` (optional, defaults to 10)
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let source_url = match std::env::var("BRIEFING_SOURCE_URL") {
            Err(_) => defaults.source_url,
            Ok(raw) => {
                let parsed = Url::parse(&raw).map_err(|e| {
                    AppError::ConfigError(format!("Invalid BRIEFING_SOURCE_URL '{raw}': {e}"))
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(AppError::ConfigError(format!(
                        "BRIEFING_SOURCE_URL must be http or https, got '{raw}'"
                    )));
                }
                raw
            }
        };

        let request_delay = env_secs("BRIEFING_REQUEST_DELAY_SECS", 0)?
            .unwrap_or(defaults.request_delay);
        let fetch_timeout = env_secs("BRIEFING_FETCH_TIMEOUT_SECS", 1)?
            .unwrap_or(defaults.fetch_timeout);

        Ok(Self {
            source_url,
            request_delay,
            fetch_timeout,
        })
    }
}

/// Parse an optional whole-seconds variable, rejecting values below `min`.
fn env_secs(name: &str, min: u64) -> Result<Option<Duration>, AppError> {
    match std::env::var(name) {
        Err(_) => Ok(None),
        Ok(raw) => parse_secs(name, &raw, min).map(Some),
    }
}

fn parse_secs(name: &str, raw: &str, min: u64) -> Result<Duration, AppError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        AppError::ConfigError(format!(
            "Invalid {name} '{raw}': must be a whole number of seconds"
        ))
    })?;
    if secs < min {
        return Err(AppError::ConfigError(format!(
            "{name} must be at least {min}"
        )));
    }
    Ok(Duration::from_secs(secs))
}
