//! Hacker News front-page extractor.
//!
//! Story rows are `<tr class="athing">` elements. Each carries a
//! `.titleline` span whose first anchor holds the headline and its target.
//! Self posts ("Ask HN", "Show HN" without a URL) link to `item?id=N`
//! relative to the page; those are resolved against the front-page URL the
//! way a browser would, so every emitted link is absolute.

use std::sync::LazyLock;

use briefing_core::error::{AppError, ExtractionAnomaly};
use briefing_core::models::{Candidate, RowOutcome};
use briefing_core::throttle::{ThrottleConfig, ThrottledFetcher};
use briefing_core::traits::{Fetcher, FrontPageSource};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::ScraperConfig;
use crate::fetcher::ReqwestFetcher;

pub const HACKER_NEWS_URL: &str = "https://news.ycombinator.com";

static STORY_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr.athing").expect("valid story row selector"));
static TITLE_LINE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".titleline").expect("valid title line selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid anchor selector"));

/// Scrapes the top stories from a Hacker News style front page.
#[derive(Clone)]
pub struct HackerNewsScraper<F> {
    fetcher: F,
    page_url: String,
    /// Parsed `page_url`, for resolving relative links.
    base: Url,
}

impl<F: Fetcher> HackerNewsScraper<F> {
    /// Scrape the public Hacker News front page.
    pub fn new(fetcher: F) -> Result<Self, AppError> {
        Self::with_source_url(fetcher, HACKER_NEWS_URL)
    }

    /// Scrape a front page at a different address (mirrors, tests).
    pub fn with_source_url(fetcher: F, page_url: &str) -> Result<Self, AppError> {
        let base = Url::parse(page_url)
            .map_err(|e| AppError::ConfigError(format!("Invalid source URL '{page_url}': {e}")))?;
        Ok(Self {
            fetcher,
            page_url: page_url.to_string(),
            base,
        })
    }
}

impl HackerNewsScraper<ThrottledFetcher<ReqwestFetcher>> {
    /// Build the production scraper: reqwest behind the courtesy throttle.
    pub fn from_config(config: &ScraperConfig) -> Result<Self, AppError> {
        let fetcher = ReqwestFetcher::with_timeout(config.fetch_timeout)?;
        let throttled = ThrottledFetcher::new(fetcher, ThrottleConfig::new(config.request_delay));
        Self::with_source_url(throttled, &config.source_url)
    }
}

impl<F: Fetcher> FrontPageSource for HackerNewsScraper<F> {
    async fn scrape_top(&self, limit: usize) -> Result<Vec<RowOutcome>, AppError> {
        tracing::info!(limit, url = %self.page_url, "Scraping front page");

        let html = self.fetcher.fetch(&self.page_url).await?;
        tracing::info!(bytes = html.len(), "Fetched front page");

        let rows = parse_front_page(&html, &self.base, limit);
        for row in &rows {
            match row {
                RowOutcome::Candidate(c) => {
                    tracing::debug!(title = %c.title, link = %c.link, "Extracted story");
                }
                RowOutcome::Skipped { rank, anomaly } => {
                    tracing::warn!(rank, %anomaly, "Skipping malformed story row");
                }
            }
        }

        let extracted = rows.iter().filter(|r| r.candidate().is_some()).count();
        tracing::info!(extracted, skipped = rows.len() - extracted, "Parsed story rows");
        Ok(rows)
    }
}

/// Extract the first `limit` story rows of a front page, in document order.
///
/// Rows past `limit` are never examined. A malformed row inside the window
/// yields [`RowOutcome::Skipped`] and still uses up one slot.
pub fn parse_front_page(html: &str, base: &Url, limit: usize) -> Vec<RowOutcome> {
    let document = Html::parse_document(html);

    document
        .select(&STORY_ROW)
        .take(limit)
        .enumerate()
        .map(|(i, row)| match extract_row(row, base) {
            Ok(candidate) => RowOutcome::Candidate(candidate),
            Err(anomaly) => RowOutcome::Skipped {
                rank: i + 1,
                anomaly,
            },
        })
        .collect()
}

/// Extract one story row.
///
/// Unlike the HN page itself, a row whose anchor text is blank is not kept
/// with an empty title; it is skipped as [`ExtractionAnomaly::EmptyTitle`].
fn extract_row(row: ElementRef<'_>, base: &Url) -> Result<Candidate, ExtractionAnomaly> {
    let title_line = row
        .select(&TITLE_LINE)
        .next()
        .ok_or(ExtractionAnomaly::MissingTitleLine)?;
    let anchor = title_line
        .select(&ANCHOR)
        .next()
        .ok_or(ExtractionAnomaly::MissingAnchor)?;

    let text: String = anchor.text().collect();
    let title = text.trim();
    if title.is_empty() {
        return Err(ExtractionAnomaly::EmptyTitle);
    }

    let href = anchor
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(ExtractionAnomaly::MissingHref)?;

    Ok(Candidate {
        title: title.to_string(),
        link: normalize_link(href, base)?,
    })
}

/// Canonicalize a story link.
///
/// Absolute http(s) links pass through untouched. Anything else is resolved
/// against `base`; results that are not http(s) are rejected.
pub fn normalize_link(raw: &str, base: &Url) -> Result<String, ExtractionAnomaly> {
    if has_http_scheme(raw) {
        return Ok(raw.to_string());
    }

    let resolved = base
        .join(raw)
        .map_err(|_| ExtractionAnomaly::InvalidLink(raw.to_string()))?;

    match resolved.scheme() {
        "http" | "https" => Ok(resolved.into()),
        _ => Err(ExtractionAnomaly::InvalidLink(raw.to_string())),
    }
}

fn has_http_scheme(link: &str) -> bool {
    let lower = link.get(..8).unwrap_or(link).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
