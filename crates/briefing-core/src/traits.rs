use std::future::Future;

use crate::error::AppError;
use crate::models::{Article, RowOutcome};

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Produces the story rows at the top of an aggregator's front page.
pub trait FrontPageSource: Send + Sync + Clone {
    /// Fetch the front page and extract at most `limit` rows, in display order.
    ///
    /// Fetch failures abort the whole call. Malformed rows come back as
    /// [`RowOutcome::Skipped`] and still count toward `limit`.
    fn scrape_top(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RowOutcome>, AppError>> + Send;
}

/// Persists and retrieves articles. `link` is unique across the store.
pub trait ArticleStore: Send + Sync + Clone {
    /// Exact-match lookup by link.
    fn find_by_link(
        &self,
        link: &str,
    ) -> impl Future<Output = Result<Option<Article>, AppError>> + Send;

    /// Insert a new article. Fails with [`AppError::ConstraintViolation`]
    /// if the link is already stored.
    fn insert(
        &self,
        title: &str,
        link: &str,
    ) -> impl Future<Output = Result<Article, AppError>> + Send;

    /// Insert a new article unless its link is already stored.
    ///
    /// Returns `None` when the link exists. Atomic with respect to other
    /// callers: two concurrent calls with the same link insert exactly once.
    fn insert_if_absent(
        &self,
        title: &str,
        link: &str,
    ) -> impl Future<Output = Result<Option<Article>, AppError>> + Send;

    /// Most recently created articles, newest first.
    fn list_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Article>, AppError>> + Send;
}
