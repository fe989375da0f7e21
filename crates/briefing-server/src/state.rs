use briefing_client::{HackerNewsScraper, ReqwestFetcher};
use briefing_core::ThrottledFetcher;
use briefing_db::Database;

/// The production front-page scraper: reqwest behind the courtesy throttle.
pub type Scraper = HackerNewsScraper<ThrottledFetcher<ReqwestFetcher>>;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    /// Cloned per request; clones share one throttle gate.
    pub scraper: Scraper,
}
