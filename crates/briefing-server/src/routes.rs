use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use briefing_core::ScrapeService;

use crate::dto::{
    ArticleListResponse, ArticleResponse, HealthResponse, ListArticlesQuery, RootResponse,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

const SERVICE_NAME: &str = "Briefing API";

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/scrape", post(scrape))
        .route("/articles", get(list_articles))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/scrape",
    responses(
        (status = 200, description = "Newly stored articles, in front-page order", body = Vec<ArticleResponse>),
        (status = 502, description = "Front page could not be fetched", body = crate::dto::ErrorResponse),
        (status = 504, description = "Front page fetch timed out", body = crate::dto::ErrorResponse),
        (status = 500, description = "Internal failure", body = crate::dto::ErrorResponse),
    ),
    tag = "scrape"
)]
pub async fn scrape(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Scrape endpoint called");

    let service = ScrapeService::new(state.scraper.clone(), state.db.article_repo());
    let articles = service.run_scrape().await.map_err(|e| {
        tracing::error!(error = %e, fetch_failure = e.is_fetch_failure(), "Scrape failed");
        ApiError::with_context(e, "Scraping failed")
    })?;

    tracing::info!("Returning {} new articles", articles.len());

    let response: Vec<ArticleResponse> = articles.into_iter().map(ArticleResponse::from).collect();
    Ok(axum::Json(response))
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/articles",
    params(ListArticlesQuery),
    responses(
        (status = 200, description = "Stored articles, newest first", body = ArticleListResponse),
    ),
    tag = "articles"
)]
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListArticlesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(20).min(100);
    let articles = state.db.article_repo().list_recent(limit).await?;
    let total = articles.len();

    let response = ArticleListResponse {
        articles: articles.into_iter().map(ArticleResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response))
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse { status: "healthy" })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service descriptor", body = RootResponse),
    ),
    tag = "system"
)]
pub async fn root() -> impl IntoResponse {
    let endpoints = BTreeMap::from([
        (
            "scrape".to_string(),
            "POST /scrape - Scrape the front page and return new articles".to_string(),
        ),
        (
            "articles".to_string(),
            "GET /articles - List stored articles, newest first".to_string(),
        ),
        (
            "health".to_string(),
            "GET /health - Health check endpoint".to_string(),
        ),
    ]);

    axum::Json(RootResponse {
        message: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}
