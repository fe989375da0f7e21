use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Briefing API",
        description = "Scrapes the Hacker News front page and stores articles it has not seen before."
    ),
    paths(
        crate::routes::scrape,
        crate::routes::list_articles,
        crate::routes::health,
        crate::routes::root,
    ),
    components(schemas(
        crate::dto::ArticleResponse,
        crate::dto::ArticleListResponse,
        crate::dto::HealthResponse,
        crate::dto::RootResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "scrape", description = "Trigger a front-page scrape"),
        (name = "articles", description = "Stored articles"),
        (name = "system", description = "Health and service description"),
    )
)]
pub struct ApiDoc;
