//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use sqlx::PgPool;

use storefront::{DomainError, Repository, Tag, TagRepository};

use super::map_db_error;

/// PostgreSQL implementation of TagRepository
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    label: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id,
            label: row.label,
        }
    }
}

#[async_trait]
impl Repository<Tag> for PgTagRepository {
    async fn create(&self, tag: &Tag) -> Result<Tag, DomainError> {
        let row =
            sqlx::query_as::<_, TagRow>("INSERT INTO tags (label) VALUES ($1) RETURNING id, label")
                .bind(&tag.label)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn read(&self, id: i64) -> Result<Option<Tag>, DomainError> {
        let row = sqlx::query_as::<_, TagRow>("SELECT id, label FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, tag: &Tag) -> Result<Option<Tag>, DomainError> {
        let row = sqlx::query_as::<_, TagRow>(
            "UPDATE tags SET label = $2 WHERE id = $1 RETURNING id, label",
        )
        .bind(tag.id)
        .bind(&tag.label)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tags WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn find_all(&self) -> Result<Vec<Tag>, DomainError> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT id, label FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_label(&self, label: &str) -> Result<Option<Tag>, DomainError> {
        let row = sqlx::query_as::<_, TagRow>("SELECT id, label FROM tags WHERE label = $1")
            .bind(label)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }
}
