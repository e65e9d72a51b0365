//! The four maintenance passes.
//!
//! Each pass takes the repositories it needs plus the current instant,
//! and converts any error into a [`PassOutcome::Failed`] so a broken
//! pass never stops the run. The caller decides the order; see the
//! runner.

use tracing::debug;

use olives_core::{
    pending_cutoff, AccountRepository, AccountTokenRepository, AppointmentRepository,
    JunkFileRepository, StorageBackend,
};

use crate::outcome::PassOutcome;

/// Delete every account token that expired at or before `now_ms`.
pub async fn expire_account_tokens(
    repo: &dyn AccountTokenRepository,
    now_ms: i64,
) -> PassOutcome {
    match repo.delete_expired(now_ms).await {
        Ok(affected) => PassOutcome::Completed { affected },
        Err(e) => PassOutcome::Failed {
            error: e.to_string(),
        },
    }
}

/// Delete pending accounts whose one-day grace window has elapsed.
///
/// An account created exactly one grace window ago is kept; the window
/// is strict.
pub async fn expire_pending_accounts(repo: &dyn AccountRepository, now_ms: i64) -> PassOutcome {
    match repo.delete_stale_pending(pending_cutoff(now_ms)).await {
        Ok(affected) => PassOutcome::Completed { affected },
        Err(e) => PassOutcome::Failed {
            error: e.to_string(),
        },
    }
}

/// Transition overdue appointments: Pending becomes Expired, Active
/// becomes Done.
pub async fn expire_appointments(repo: &dyn AppointmentRepository, now_ms: i64) -> PassOutcome {
    match repo.expire_overdue(now_ms).await {
        Ok(affected) => PassOutcome::Completed { affected },
        Err(e) => PassOutcome::Failed {
            error: e.to_string(),
        },
    }
}

/// Remove junk file records, deleting the backing file when one exists.
///
/// A record with a blank path is purged without touching storage. A
/// record whose file cannot be checked or deleted is kept for the next
/// run and the scan continues; only the listing and the final record
/// deletion can fail the pass.
pub async fn clean_junk_files(
    repo: &dyn JunkFileRepository,
    storage: &dyn StorageBackend,
) -> PassOutcome {
    let records = match repo.list().await {
        Ok(records) => records,
        Err(e) => {
            return PassOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    let mut removable = Vec::with_capacity(records.len());
    for record in &records {
        if record.path.trim().is_empty() {
            removable.push(record.id);
            continue;
        }
        match storage.exists(&record.path).await {
            Ok(false) => removable.push(record.id),
            Ok(true) => match storage.delete(&record.path).await {
                Ok(()) => removable.push(record.id),
                Err(e) => {
                    debug!(
                        subsystem = "maintenance",
                        pass = "junk_files",
                        file_path = %record.path,
                        error = %e,
                        "Keeping junk record, file delete failed"
                    );
                }
            },
            Err(e) => {
                debug!(
                    subsystem = "maintenance",
                    pass = "junk_files",
                    file_path = %record.path,
                    error = %e,
                    "Keeping junk record, existence check failed"
                );
            }
        }
    }

    match repo.delete_many(&removable).await {
        Ok(affected) => PassOutcome::Completed { affected },
        Err(e) => PassOutcome::Failed {
            error: e.to_string(),
        },
    }
}
