//! Appointment repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use olives_core::{Appointment, AppointmentRepository, AppointmentStatus, Error, Result};

/// PostgreSQL implementation of [`AppointmentRepository`].
#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an appointment row.
    pub async fn insert(&self, appointment: &Appointment) -> Result<()> {
        sqlx::query(
            "INSERT INTO appointments
               (id, maker_id, dater_id, from_ms, to_ms, status, note, created_ms)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(appointment.id)
        .bind(appointment.maker_id)
        .bind(appointment.dater_id)
        .bind(appointment.from_ms)
        .bind(appointment.to_ms)
        .bind(appointment.status.as_db_str())
        .bind(&appointment.note)
        .bind(appointment.created_ms)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    /// Fetch an appointment's status, or `None` when the row is gone.
    pub async fn fetch_status(&self, id: Uuid) -> Result<Option<AppointmentStatus>> {
        let row = sqlx::query("SELECT status FROM appointments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.map(|row| AppointmentStatus::from_db_str(row.get("status"))))
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn expire_overdue(&self, now_ms: i64) -> Result<u64> {
        // One bulk statement applies the whole transition table
        // (pending -> expired, active -> done); single-statement
        // atomicity stands in for an explicit transaction.
        let result = sqlx::query(
            "UPDATE appointments
             SET status = CASE status
                 WHEN 'pending' THEN 'expired'
                 WHEN 'active' THEN 'done'
             END
             WHERE status IN ('pending', 'active') AND to_ms < $1",
        )
        .bind(now_ms)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "appointments",
            op = "expire_overdue",
            db_table = "appointments",
            affected_rows = result.rows_affected(),
            "Overdue appointments transitioned"
        );
        Ok(result.rows_affected())
    }
}
