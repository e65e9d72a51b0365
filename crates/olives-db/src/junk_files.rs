//! Junk file record repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use olives_core::{Error, JunkFile, JunkFileRepository, Result};

/// PostgreSQL implementation of [`JunkFileRepository`].
#[derive(Clone)]
pub struct PgJunkFileRepository {
    pool: PgPool,
}

impl PgJunkFileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a junk file record.
    pub async fn insert(&self, junk: &JunkFile) -> Result<()> {
        sqlx::query(
            "INSERT INTO junk_files (id, path, size_bytes, created_ms)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(junk.id)
        .bind(&junk.path)
        .bind(junk.size_bytes)
        .bind(junk.created_ms)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }
}

#[async_trait]
impl JunkFileRepository for PgJunkFileRepository {
    async fn list(&self) -> Result<Vec<JunkFile>> {
        let rows = sqlx::query(
            "SELECT id, path, size_bytes, created_ms FROM junk_files ORDER BY created_ms",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| JunkFile {
                id: row.get("id"),
                path: row.get("path"),
                size_bytes: row.get("size_bytes"),
                created_ms: row.get("created_ms"),
            })
            .collect())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM junk_files WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "junk_files",
            op = "delete_many",
            db_table = "junk_files",
            affected_rows = result.rows_affected(),
            "Junk file records deleted"
        );
        Ok(result.rows_affected())
    }
}
