use briefing_core::error::AppError;
use briefing_core::models::Article;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

/// Repository for article persistence in PostgreSQL.
///
/// The `articles.link` column carries a unique constraint; it is the only
/// guard against duplicates.
#[derive(Clone)]
pub struct ArticleRepository {
    pool: Pool<Postgres>,
}

impl ArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Exact-match lookup by link.
    pub async fn find_by_link(&self, link: &str) -> Result<Option<Article>, AppError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, link, created_at, is_processed
            FROM articles
            WHERE link = $1
            "#,
        )
        .bind(link)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Insert a new, unprocessed article.
    ///
    /// A duplicate link fails with [`AppError::ConstraintViolation`].
    pub async fn insert(&self, title: &str, link: &str) -> Result<Article, AppError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            INSERT INTO articles (title, link)
            VALUES ($1, $2)
            RETURNING id, title, link, created_at, is_processed
            "#,
        )
        .bind(title)
        .bind(link)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, link))?;

        Ok(row.into())
    }

    /// Insert a new article unless the link is already stored.
    ///
    /// One round trip; `ON CONFLICT DO NOTHING` makes concurrent callers
    /// with the same link insert exactly once.
    pub async fn insert_if_absent(
        &self,
        title: &str,
        link: &str,
    ) -> Result<Option<Article>, AppError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            INSERT INTO articles (title, link)
            VALUES ($1, $2)
            ON CONFLICT (link) DO NOTHING
            RETURNING id, title, link, created_at, is_processed
            "#,
        )
        .bind(title)
        .bind(link)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Most recently stored articles, newest first.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<Article>, AppError> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, link, created_at, is_processed
            FROM articles
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

fn map_insert_error(err: sqlx::Error, link: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::ConstraintViolation(format!("link already stored: {link}"))
        }
        _ => AppError::DatabaseError(err.to_string()),
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: Uuid,
    title: String,
    link: String,
    created_at: DateTime<Utc>,
    is_processed: bool,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            title: row.title,
            link: row.link,
            created_at: row.created_at,
            is_processed: row.is_processed,
        }
    }
}

// -- Trait implementation --

impl briefing_core::traits::ArticleStore for ArticleRepository {
    async fn find_by_link(&self, link: &str) -> Result<Option<Article>, AppError> {
        ArticleRepository::find_by_link(self, link).await
    }

    async fn insert(&self, title: &str, link: &str) -> Result<Article, AppError> {
        ArticleRepository::insert(self, title, link).await
    }

    async fn insert_if_absent(&self, title: &str, link: &str) -> Result<Option<Article>, AppError> {
        ArticleRepository::insert_if_absent(self, title, link).await
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Article>, AppError> {
        ArticleRepository::list_recent(self, limit).await
    }
}
