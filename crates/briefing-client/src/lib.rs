pub mod config;
pub mod fetcher;
pub mod hacker_news;

pub use config::ScraperConfig;
pub use fetcher::ReqwestFetcher;
pub use hacker_news::{HackerNewsScraper, parse_front_page};
