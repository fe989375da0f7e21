use std::collections::HashSet;

use briefing_core::models::{Candidate, RowOutcome};
use briefing_core::traits::FrontPageSource;
use briefing_core::{AppError, ExtractionAnomaly, ScrapeService};
use briefing_db::ArticleRepository;

use crate::integration::common::setup_test_db;

/// Front page that always serves the same rows, or always fails.
#[derive(Clone)]
struct StaticPage {
    rows: Vec<RowOutcome>,
    fail: bool,
}

impl StaticPage {
    fn new(rows: Vec<RowOutcome>) -> Self {
        Self { rows, fail: false }
    }

    fn unreachable() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
        }
    }
}

impl FrontPageSource for StaticPage {
    async fn scrape_top(&self, limit: usize) -> Result<Vec<RowOutcome>, AppError> {
        if self.fail {
            return Err(AppError::HttpError("HTTP 503 for front page".into()));
        }
        Ok(self.rows.iter().take(limit).cloned().collect())
    }
}

fn story(title: &str, link: &str) -> RowOutcome {
    RowOutcome::Candidate(Candidate::new(title, link))
}

#[tokio::test]
async fn scrape_twice_is_idempotent() {
    let (pool, _container) = setup_test_db().await;
    let repo = ArticleRepository::new(pool);
    let page = StaticPage::new(vec![
        story("Super AI Project", "https://example.com/ai-news"),
        story(
            "Show HN: Local Link",
            "https://news.ycombinator.com/item?id=12345",
        ),
    ]);
    let svc = ScrapeService::new(page, repo.clone());

    let first = svc.run_scrape().await.unwrap();
    let second = svc.run_scrape().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first[0].title, "Super AI Project");
    assert_eq!(first[1].link, "https://news.ycombinator.com/item?id=12345");
    assert!(second.is_empty());
    assert_eq!(repo.list_recent(10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn only_top_five_rows_are_stored() {
    let (pool, _container) = setup_test_db().await;
    let repo = ArticleRepository::new(pool);
    let rows = (1..=8)
        .map(|i| story(&format!("Story {i}"), &format!("https://example.com/{i}")))
        .collect();
    let svc = ScrapeService::new(StaticPage::new(rows), repo.clone());

    let inserted = svc.run_scrape().await.unwrap();

    let titles: Vec<_> = inserted.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Story 1", "Story 2", "Story 3", "Story 4", "Story 5"]
    );
}

#[tokio::test]
async fn skipped_rows_and_duplicates_keep_links_unique() {
    let (pool, _container) = setup_test_db().await;
    let repo = ArticleRepository::new(pool);
    repo.insert("Old", "https://example.com/old").await.unwrap();

    let rows = vec![
        story("Old again", "https://example.com/old"),
        RowOutcome::Skipped {
            rank: 2,
            anomaly: ExtractionAnomaly::MissingTitleLine,
        },
        story("New", "https://example.com/new"),
        story("New twice", "https://example.com/new"),
    ];
    let svc = ScrapeService::new(StaticPage::new(rows), repo.clone());

    let inserted = svc.run_scrape().await.unwrap();

    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].title, "New");

    let all = repo.list_recent(100).await.unwrap();
    let links: HashSet<_> = all.iter().map(|a| a.link.as_str()).collect();
    assert_eq!(links.len(), all.len());
}

#[tokio::test]
async fn fetch_failure_inserts_nothing() {
    let (pool, _container) = setup_test_db().await;
    let repo = ArticleRepository::new(pool);
    let svc = ScrapeService::new(StaticPage::unreachable(), repo.clone());

    let err = svc.run_scrape().await.unwrap_err();

    assert!(err.is_fetch_failure());
    assert!(repo.list_recent(10).await.unwrap().is_empty());
}
