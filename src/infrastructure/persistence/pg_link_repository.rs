//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{LinkRecord, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape shared by every query returning a full record.
#[derive(Debug, FromRow)]
struct LinkRow {
    code: String,
    target_url: String,
    clicks: i64,
    last_accessed: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for LinkRecord {
    fn from(r: LinkRow) -> Self {
        LinkRecord::new(r.code, r.target_url, r.clicks, r.last_accessed, r.created_at)
    }
}

/// PostgreSQL repository for link records.
///
/// Uniqueness of `code` is enforced by the `links_code_key` constraint.
/// Resolution runs inside a transaction holding a `FOR UPDATE` row lock.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<LinkRecord, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, target_url)
            VALUES ($1, $2)
            RETURNING code, target_url, clicks, last_accessed, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM links WHERE code = $1)",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, target_url, clicks, last_accessed, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn resolve_and_hit(&self, code: &str) -> Result<Option<String>, AppError> {
        // Dropping `tx` before commit rolls back, so an error or a cancelled
        // future never leaves a half-applied hit.
        let mut tx = self.pool.begin().await?;

        let target_url = sqlx::query_scalar::<_, String>(
            "SELECT target_url FROM links WHERE code = $1 FOR UPDATE",
        )
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?;

        // Nothing was written; dropping `tx` releases it.
        let Some(target_url) = target_url else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE links
            SET clicks = clicks + 1,
                last_accessed = NOW()
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(target_url))
    }

    async fn delete(&self, code: &str) -> Result<Option<String>, AppError> {
        let deleted = sqlx::query_scalar::<_, String>(
            "DELETE FROM links WHERE code = $1 RETURNING code",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(deleted)
    }

    async fn list_all(&self) -> Result<Vec<LinkRecord>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, target_url, clicks, last_accessed, created_at
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
