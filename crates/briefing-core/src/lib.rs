pub mod error;
pub mod models;
pub mod scrape;
pub mod throttle;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{AppError, ExtractionAnomaly};
pub use models::{Article, Candidate, RowOutcome};
pub use scrape::{ScrapeService, TOP_STORIES};
pub use throttle::{ThrottleConfig, ThrottledFetcher};
pub use traits::{ArticleStore, Fetcher, FrontPageSource};
