use thiserror::Error;

/// Application-wide error types for Briefing.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// An insert collided with an existing article link.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if the error came from fetching the upstream page.
    ///
    /// These abort a scrape before anything is written to the store.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_) | AppError::NetworkError(_) | AppError::Timeout(_)
        )
    }
}

/// Why a story row was skipped during extraction.
///
/// Anomalies are recovered locally: the row is dropped and the rest of the
/// batch continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionAnomaly {
    #[error("row has no title line")]
    MissingTitleLine,

    #[error("title line has no anchor")]
    MissingAnchor,

    #[error("anchor has no href")]
    MissingHref,

    #[error("anchor text is empty")]
    EmptyTitle,

    #[error("link '{0}' cannot be made absolute")]
    InvalidLink(String),
}
