//! Core data models for the Olives platform.
//!
//! These types are shared across all Olives crates and represent the
//! domain entities the maintenance service operates on. All persisted
//! instants are Unix epoch milliseconds (`i64`), matching the column
//! representation in the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ACCOUNT TYPES
// =============================================================================

/// Lifecycle status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Registered but not yet activated.
    Pending,
    /// Activated and usable.
    Active,
    /// Disabled by an administrator.
    Inactive,
}

impl AccountStatus {
    /// Convert to the string stored in the database.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        }
    }

    /// Convert a database string back to a status.
    pub fn from_db_str(s: &str) -> AccountStatus {
        match s {
            "active" => AccountStatus::Active,
            "inactive" => AccountStatus::Inactive,
            _ => AccountStatus::Pending, // fallback
        }
    }
}

/// Role of an account on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Admin,
    Doctor,
    Patient,
}

impl AccountRole {
    /// Convert to the string stored in the database.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => "admin",
            AccountRole::Doctor => "doctor",
            AccountRole::Patient => "patient",
        }
    }

    /// Convert a database string back to a role.
    pub fn from_db_str(s: &str) -> AccountRole {
        match s {
            "admin" => AccountRole::Admin,
            "doctor" => AccountRole::Doctor,
            _ => AccountRole::Patient, // fallback
        }
    }
}

/// A platform account (person record).
///
/// Doctor and patient accounts additionally own a specialization row
/// (`doctors` / `patients`) keyed by this account's id; those rows must
/// be removed before the account row itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub role: AccountRole,
    pub status: AccountStatus,
    /// Creation instant, epoch milliseconds.
    pub created_ms: i64,
}

/// A pending credential grant (activation / password-reset code).
///
/// Deleted by the maintenance service once past its expiry instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountToken {
    pub id: Uuid,
    pub account_id: Uuid,
    pub code: String,
    /// Expiry instant, epoch milliseconds.
    pub expired_ms: i64,
}

// =============================================================================
// APPOINTMENT TYPES
// =============================================================================

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Active,
    Done,
    Expired,
    Cancelled,
}

impl AppointmentStatus {
    /// Convert to the string stored in the database.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Active => "active",
            AppointmentStatus::Done => "done",
            AppointmentStatus::Expired => "expired",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Convert a database string back to a status.
    pub fn from_db_str(s: &str) -> AppointmentStatus {
        match s {
            "active" => AppointmentStatus::Active,
            "done" => AppointmentStatus::Done,
            "expired" => AppointmentStatus::Expired,
            "cancelled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Pending, // fallback
        }
    }

    /// Status this appointment moves to once its `to_ms` instant has
    /// passed, or `None` when the expiry sweep must leave it untouched.
    ///
    /// The full transition table:
    /// `Pending -> Expired`, `Active -> Done`; every other status is
    /// terminal for the sweep.
    pub fn expiry_transition(&self) -> Option<AppointmentStatus> {
        match self {
            AppointmentStatus::Pending => Some(AppointmentStatus::Expired),
            AppointmentStatus::Active => Some(AppointmentStatus::Done),
            _ => None,
        }
    }
}

/// An appointment between two accounts over a time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    /// Account that created the appointment.
    pub maker_id: Uuid,
    /// Account the appointment is with.
    pub dater_id: Uuid,
    /// Window start, epoch milliseconds.
    pub from_ms: i64,
    /// Window end, epoch milliseconds.
    pub to_ms: i64,
    pub status: AppointmentStatus,
    pub note: Option<String>,
    /// Creation instant, epoch milliseconds.
    pub created_ms: i64,
}

// =============================================================================
// JUNK FILE TYPES
// =============================================================================

/// A tracked filesystem artifact no longer referenced by business data,
/// eligible for garbage collection by the maintenance service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunkFile {
    pub id: Uuid,
    /// Path relative to the storage backend root. May be blank for
    /// records whose file was never written.
    pub path: String,
    pub size_bytes: i64,
    /// Creation instant, epoch milliseconds.
    pub created_ms: i64,
}
