//! Core traits for Olives abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability. The
//! Postgres implementations live in `olives-db`; the maintenance
//! service consumes them as trait objects so its passes can be tested
//! against in-memory fakes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::JunkFile;

/// Repository for account activation/reset tokens.
#[async_trait]
pub trait AccountTokenRepository: Send + Sync {
    /// Delete every token whose expiry instant is at or before `now_ms`.
    ///
    /// Runs in a single transaction: either all expired tokens are
    /// removed or none are. Returns the number of rows deleted.
    async fn delete_expired(&self, now_ms: i64) -> Result<u64>;
}

/// Repository for platform accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Delete every still-pending account created strictly before
    /// `cutoff_ms`, together with its doctor/patient specialization
    /// row (removed first, to respect referential integrity).
    ///
    /// Runs in a single transaction. Returns the number of account
    /// rows deleted.
    async fn delete_stale_pending(&self, cutoff_ms: i64) -> Result<u64>;
}

/// Repository for appointments.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Transition every appointment whose window end has passed:
    /// Pending rows become Expired, Active rows become Done. No other
    /// status is touched. Returns the number of rows updated.
    ///
    /// Issued as one bulk statement; atomicity comes from the store's
    /// unit of work rather than an explicit transaction.
    async fn expire_overdue(&self, now_ms: i64) -> Result<u64>;
}

/// Repository for junk file records.
#[async_trait]
pub trait JunkFileRepository: Send + Sync {
    /// List every tracked junk file record.
    async fn list(&self) -> Result<Vec<JunkFile>>;

    /// Delete the given records. Returns the number of rows deleted.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64>;
}

/// Durable file storage operations needed by the maintenance service.
///
/// Allows abstracting over filesystem, object-store, or other storage
/// providers.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Check whether a file exists at the given path.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Delete the file at the given path.
    async fn delete(&self, path: &str) -> Result<()>;
}
