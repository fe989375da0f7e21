//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests. All mocks use
//! `Arc<Mutex<_>>` so clones share state and tests can assert on it.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Article, RowOutcome};
use crate::traits::{ArticleStore, Fetcher, FrontPageSource};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns queued responses.
#[derive(Clone)]
pub struct MockFetcher {
    /// Each call pops the first element. If empty, returns a default page.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self::with_responses(vec![Ok(html.to_string())])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, AppError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockSource
// ---------------------------------------------------------------------------

/// Mock front page that returns canned rows and records requested limits.
#[derive(Clone)]
pub struct MockSource {
    responses: Arc<Mutex<Vec<Result<Vec<RowOutcome>, AppError>>>>,
    /// Returned once the queue is drained.
    fallback: Vec<RowOutcome>,
    pub limits: Arc<Mutex<Vec<usize>>>,
}

impl MockSource {
    /// Returns `rows` on the first call, nothing afterwards.
    pub fn new(rows: Vec<RowOutcome>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(rows)])),
            fallback: Vec::new(),
            limits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns `rows` on every call (an unchanged front page).
    pub fn repeating(rows: Vec<RowOutcome>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            fallback: rows,
            limits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
            fallback: Vec::new(),
            limits: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FrontPageSource for MockSource {
    async fn scrape_top(&self, limit: usize) -> Result<Vec<RowOutcome>, AppError> {
        self.limits.lock().unwrap().push(limit);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.fallback.iter().take(limit).cloned().collect())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockStore
// ---------------------------------------------------------------------------

/// In-memory article store enforcing link uniqueness.
#[derive(Clone)]
pub struct MockStore {
    articles: Arc<Mutex<Vec<Article>>>,
    /// Fail the insert that would bring the store to this many articles.
    fail_at: Arc<Mutex<Option<(usize, AppError)>>>,
}

impl MockStore {
    pub fn empty() -> Self {
        Self {
            articles: Arc::new(Mutex::new(Vec::new())),
            fail_at: Arc::new(Mutex::new(None)),
        }
    }

    /// Store pre-populated with articles for the given links.
    pub fn with_links(links: &[&str]) -> Self {
        let store = Self::empty();
        {
            let mut articles = store.articles.lock().unwrap();
            for link in links {
                articles.push(make_test_article("existing", link));
            }
        }
        store
    }

    /// Store that accepts `count` inserts, then returns `error`.
    pub fn failing_after(count: usize, error: AppError) -> Self {
        Self {
            articles: Arc::new(Mutex::new(Vec::new())),
            fail_at: Arc::new(Mutex::new(Some((count, error)))),
        }
    }

    pub fn len(&self) -> usize {
        self.articles.lock().unwrap().len()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.articles.lock().unwrap().iter().any(|a| a.link == link)
    }

    fn check_failure(&self, current: usize) -> Result<(), AppError> {
        let mut fail_at = self.fail_at.lock().unwrap();
        if fail_at.as_ref().is_some_and(|(count, _)| *count == current) {
            if let Some((_, error)) = fail_at.take() {
                return Err(error);
            }
        }
        Ok(())
    }
}

impl ArticleStore for MockStore {
    async fn find_by_link(&self, link: &str) -> Result<Option<Article>, AppError> {
        let articles = self.articles.lock().unwrap();
        Ok(articles.iter().find(|a| a.link == link).cloned())
    }

    async fn insert(&self, title: &str, link: &str) -> Result<Article, AppError> {
        let mut articles = self.articles.lock().unwrap();
        if articles.iter().any(|a| a.link == link) {
            return Err(AppError::ConstraintViolation(format!(
                "link already stored: {link}"
            )));
        }
        self.check_failure(articles.len())?;
        let article = make_test_article(title, link);
        articles.push(article.clone());
        Ok(article)
    }

    async fn insert_if_absent(&self, title: &str, link: &str) -> Result<Option<Article>, AppError> {
        let mut articles = self.articles.lock().unwrap();
        if articles.iter().any(|a| a.link == link) {
            return Ok(None);
        }
        self.check_failure(articles.len())?;
        let article = make_test_article(title, link);
        articles.push(article.clone());
        Ok(Some(article))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Article>, AppError> {
        let articles = self.articles.lock().unwrap();
        Ok(articles.iter().rev().take(limit).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create an unprocessed article as the store would on insert.
pub fn make_test_article(title: &str, link: &str) -> Article {
    Article {
        id: Uuid::new_v4(),
        title: title.to_string(),
        link: link.to_string(),
        created_at: Utc::now(),
        is_processed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_store_insert_rejects_duplicate_link() {
        let store = MockStore::empty();
        store.insert("One", "https://example.com/1").await.unwrap();

        let err = store
            .insert("Two", "https://example.com/1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ConstraintViolation(_)));
        assert!(
            store
                .find_by_link("https://example.com/1")
                .await
                .unwrap()
                .is_some()
        );
    }
}
