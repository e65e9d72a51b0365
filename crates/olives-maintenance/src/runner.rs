//! Maintenance run orchestration.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use olives_core::{
    now_ms, AccountRepository, AccountTokenRepository, AppointmentRepository, JunkFileRepository,
    StorageBackend,
};
use olives_db::Database;

use crate::outcome::{Pass, PassOutcome, PassReport, RunReport};
use crate::passes;

/// Executes the maintenance passes in their fixed order.
///
/// Holds the repositories as trait objects so tests can substitute
/// in-memory fakes for any of them.
pub struct MaintenanceRunner {
    tokens: Arc<dyn AccountTokenRepository>,
    accounts: Arc<dyn AccountRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    junk_files: Arc<dyn JunkFileRepository>,
    storage: Arc<dyn StorageBackend>,
}

impl MaintenanceRunner {
    pub fn new(
        tokens: Arc<dyn AccountTokenRepository>,
        accounts: Arc<dyn AccountRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        junk_files: Arc<dyn JunkFileRepository>,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            tokens,
            accounts,
            appointments,
            junk_files,
            storage,
        }
    }

    /// Wire the runner up against the Postgres repositories.
    pub fn from_database(db: &Database, storage: Arc<dyn StorageBackend>) -> Self {
        Self::new(
            Arc::new(db.tokens.clone()),
            Arc::new(db.accounts.clone()),
            Arc::new(db.appointments.clone()),
            Arc::new(db.junk_files.clone()),
            storage,
        )
    }

    /// Run every pass once, in order: account tokens, pending accounts,
    /// appointments, junk files.
    ///
    /// Never returns an error. A pass that fails is recorded in the
    /// report and the remaining passes still run, so one broken
    /// dependency cannot starve the others.
    pub async fn run_once(&self) -> RunReport {
        let started = Instant::now();
        let now = now_ms();
        info!(
            subsystem = "maintenance",
            component = "runner",
            op = "run",
            now_ms = now,
            "Maintenance run starting"
        );

        let mut report = RunReport::default();
        report.push(
            self.timed(
                Pass::AccountTokens,
                passes::expire_account_tokens(self.tokens.as_ref(), now),
            )
            .await,
        );
        report.push(
            self.timed(
                Pass::PendingAccounts,
                passes::expire_pending_accounts(self.accounts.as_ref(), now),
            )
            .await,
        );
        report.push(
            self.timed(
                Pass::Appointments,
                passes::expire_appointments(self.appointments.as_ref(), now),
            )
            .await,
        );
        report.push(
            self.timed(
                Pass::JunkFiles,
                passes::clean_junk_files(self.junk_files.as_ref(), self.storage.as_ref()),
            )
            .await,
        );

        info!(
            subsystem = "maintenance",
            component = "runner",
            op = "run",
            affected_rows = report.total_affected(),
            failed_passes = report.failure_count(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Maintenance run complete"
        );
        report
    }

    async fn timed(&self, pass: Pass, work: impl Future<Output = PassOutcome>) -> PassReport {
        let start = Instant::now();
        let outcome = work.await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &outcome {
            PassOutcome::Completed { affected } => info!(
                subsystem = "maintenance",
                component = "runner",
                pass = pass.name(),
                affected_rows = *affected,
                duration_ms,
                "Pass completed"
            ),
            PassOutcome::Failed { error } => warn!(
                subsystem = "maintenance",
                component = "runner",
                pass = pass.name(),
                error = %error,
                duration_ms,
                "Pass failed, continuing with the remaining passes"
            ),
        }

        PassReport {
            pass,
            outcome,
            duration_ms,
        }
    }
}
