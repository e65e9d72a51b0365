//! Account token repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use olives_core::{AccountToken, AccountTokenRepository, Error, Result};

/// PostgreSQL implementation of [`AccountTokenRepository`].
#[derive(Clone)]
pub struct PgAccountTokenRepository {
    pool: PgPool,
}

impl PgAccountTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a token row.
    pub async fn insert(&self, token: &AccountToken) -> Result<()> {
        sqlx::query(
            "INSERT INTO account_tokens (id, account_id, code, expired_ms)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(token.id)
        .bind(token.account_id)
        .bind(&token.code)
        .bind(token.expired_ms)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    /// Fetch a token by id.
    pub async fn fetch(&self, id: Uuid) -> Result<Option<AccountToken>> {
        let row = sqlx::query(
            "SELECT id, account_id, code, expired_ms FROM account_tokens WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|row| AccountToken {
            id: row.get("id"),
            account_id: row.get("account_id"),
            code: row.get("code"),
            expired_ms: row.get("expired_ms"),
        }))
    }
}

#[async_trait]
impl AccountTokenRepository for PgAccountTokenRepository {
    async fn delete_expired(&self, now_ms: i64) -> Result<u64> {
        // All-or-nothing: the whole expired set goes in one transaction.
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = sqlx::query("DELETE FROM account_tokens WHERE expired_ms <= $1")
            .bind(now_ms)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "tokens",
            op = "delete_expired",
            db_table = "account_tokens",
            affected_rows = result.rows_affected(),
            "Expired account tokens deleted"
        );
        Ok(result.rows_affected())
    }
}
