//! Epoch-millisecond time helpers.
//!
//! The store keeps every instant as Unix epoch milliseconds, so all
//! expiry arithmetic happens on `i64` values. Callers obtain "now" once
//! per pass and thread it through explicitly, which keeps the cutoff
//! logic deterministic and testable.

use chrono::{DateTime, Utc};

use crate::defaults::PENDING_ACCOUNT_GRACE_MS;

/// Current instant as epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a `DateTime<Utc>` to epoch milliseconds.
pub fn epoch_ms(t: DateTime<Utc>) -> i64 {
    t.timestamp_millis()
}

/// Creation-instant cutoff for the pending-account sweep: accounts
/// created strictly before this value have outlived the grace window.
pub fn pending_cutoff(now_ms: i64) -> i64 {
    now_ms - PENDING_ACCOUNT_GRACE_MS
}

/// Whether a pending account created at `created_ms` is stale at
/// `now_ms`. Strict comparison: an account is kept at exactly
/// `created + grace` and removed one millisecond later.
pub fn pending_account_stale(created_ms: i64, now_ms: i64) -> bool {
    created_ms + PENDING_ACCOUNT_GRACE_MS < now_ms
}
