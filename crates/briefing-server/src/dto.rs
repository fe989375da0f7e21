use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use briefing_core::models::Article;

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    /// Canonical absolute URL
    pub link: String,
    /// RFC 3339 timestamp
    pub created_at: DateTime<Utc>,
    pub is_processed: bool,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            link: a.link,
            created_at: a.created_at,
            is_processed: a.is_processed,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListArticlesQuery {
    /// Maximum number of articles (default 20, max 100)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleResponse>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    /// Route → description
    pub endpoints: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
