use crate::error::AppError;
use crate::models::{Article, RowOutcome};
use crate::traits::{ArticleStore, FrontPageSource};

/// Number of front-page rows considered per scrape.
pub const TOP_STORIES: usize = 5;

/// Orchestrates the scrape pipeline: fetch → extract → dedup → persist.
///
/// Generic over the page source and the store, so both can be swapped for
/// mocks in tests.
#[derive(Clone)]
pub struct ScrapeService<P, S>
where
    P: FrontPageSource,
    S: ArticleStore,
{
    source: P,
    store: S,
}

impl<P, S> ScrapeService<P, S>
where
    P: FrontPageSource,
    S: ArticleStore,
{
    pub fn new(source: P, store: S) -> Self {
        Self { source, store }
    }

    /// Scrape the top stories and persist the ones not seen before.
    ///
    /// Returns only the newly inserted articles, in page order. A fetch
    /// failure aborts before anything is written. A store failure aborts the
    /// remaining candidates but keeps the inserts that already happened.
    pub async fn run_scrape(&self) -> Result<Vec<Article>, AppError> {
        let rows = self.source.scrape_top(TOP_STORIES).await?;
        tracing::info!(rows = rows.len(), "Scraped front page");

        let mut inserted = Vec::new();
        for row in rows {
            let candidate = match row {
                RowOutcome::Candidate(candidate) => candidate,
                RowOutcome::Skipped { rank, anomaly } => {
                    tracing::debug!(rank, %anomaly, "Ignoring skipped row");
                    continue;
                }
            };

            // The unique index on link is the guard; no separate lookup.
            match self
                .store
                .insert_if_absent(&candidate.title, &candidate.link)
                .await?
            {
                Some(article) => {
                    tracing::info!(id = %article.id, title = %article.title, "Saved new article");
                    inserted.push(article);
                }
                None => {
                    tracing::info!(link = %candidate.link, "Article already stored, skipping");
                }
            }
        }

        tracing::info!(new = inserted.len(), "Scrape complete");
        Ok(inserted)
    }
}
