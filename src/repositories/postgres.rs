use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::UrlRepository;
use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::UrlMapping;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Single-table persisted storage. Uniqueness of short codes is enforced
/// by the table's constraint, not by application-level checks.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl UrlRepository for PostgresRepository {
    async fn save(&self, code: &str, original_url: &str) -> Result<()> {
        sqlx::query("INSERT INTO url_mappings (short_code, original_url) VALUES ($1, $2)")
            .bind(code)
            .bind(original_url)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to insert URL mapping: {}", e);
                RepositoryError::from(e)
            })?;

        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<String>> {
        let original_url = sqlx::query_scalar::<_, String>(
            "SELECT original_url FROM url_mappings \
             WHERE short_code = $1 AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(original_url)
    }

    async fn dump(&self) -> Result<Value> {
        let mappings = sqlx::query_as::<_, UrlMapping>(
            "SELECT id, created_at, updated_at, deleted_at, short_code, original_url \
             FROM url_mappings WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        serde_json::to_value(mappings).map_err(|e| RepositoryError::Storage(e.to_string()))
    }
}
