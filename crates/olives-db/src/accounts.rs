//! Account repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use olives_core::{Account, AccountRepository, AccountRole, AccountStatus, Error, Result};

/// PostgreSQL implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an account row, plus its specialization row for doctor
    /// and patient roles.
    pub async fn insert(&self, account: &Account) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        sqlx::query(
            "INSERT INTO accounts (id, email, role, status, created_ms)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(account.role.as_db_str())
        .bind(account.status.as_db_str())
        .bind(account.created_ms)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        match account.role {
            AccountRole::Doctor => {
                sqlx::query("INSERT INTO doctors (account_id) VALUES ($1)")
                    .bind(account.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(Error::Database)?;
            }
            AccountRole::Patient => {
                sqlx::query("INSERT INTO patients (account_id) VALUES ($1)")
                    .bind(account.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(Error::Database)?;
            }
            AccountRole::Admin => {}
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }

    /// Fetch an account's status, or `None` when the row is gone.
    pub async fn fetch_status(&self, id: Uuid) -> Result<Option<AccountStatus>> {
        let row = sqlx::query("SELECT status FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.map(|row| AccountStatus::from_db_str(row.get("status"))))
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn delete_stale_pending(&self, cutoff_ms: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM accounts WHERE status = $1 AND created_ms < $2",
        )
        .bind(AccountStatus::Pending.as_db_str())
        .bind(cutoff_ms)
        .fetch_all(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if ids.is_empty() {
            tx.commit().await.map_err(Error::Database)?;
            return Ok(0);
        }

        // Specialization rows reference accounts.id and go first.
        sqlx::query("DELETE FROM doctors WHERE account_id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        sqlx::query("DELETE FROM patients WHERE account_id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let result = sqlx::query("DELETE FROM accounts WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "accounts",
            op = "delete_stale_pending",
            db_table = "accounts",
            affected_rows = result.rows_affected(),
            "Stale pending accounts deleted"
        );
        Ok(result.rows_affected())
    }
}
