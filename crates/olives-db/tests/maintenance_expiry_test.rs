//! Integration tests for the maintenance queries.
//!
//! These exercise the expiry semantics end to end against a live
//! Postgres instance:
//! - token expiry is transactional and idempotent
//! - the pending-account grace window is strict on its boundary
//! - the appointment sweep applies exactly the two-edge transition table
//! - junk record deletion reports affected rows
//!
//! Requires a migrated database; see `migrations/`.

use olives_core::{
    defaults::PENDING_ACCOUNT_GRACE_MS, pending_cutoff, AccountStatus, AccountTokenRepository,
    AccountRepository, AppointmentRepository, AppointmentStatus, JunkFileRepository,
};
use olives_db::test_fixtures::TestDatabase;

const T: i64 = 1_700_000_000_000;

#[tokio::test]
#[ignore = "requires a migrated olives_test database"]
async fn expired_tokens_are_deleted_and_second_run_is_a_noop() {
    let test_db = TestDatabase::new().await;
    let account = test_db.seed_pending_account(T).await;
    test_db.seed_token(account.id, T - 1).await;
    test_db.seed_token(account.id, T).await;
    let fresh = test_db.seed_token(account.id, T + 60_000).await;

    // Expiry is `expired_ms <= now`: both stale tokens go.
    let deleted = test_db.db.tokens.delete_expired(T).await.unwrap();
    assert_eq!(deleted, 2);
    assert!(test_db.db.tokens.fetch(fresh.id).await.unwrap().is_some());

    // Idempotence: nothing new expired, second run reports zero.
    let deleted = test_db.db.tokens.delete_expired(T).await.unwrap();
    assert_eq!(deleted, 0);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a migrated olives_test database"]
async fn pending_account_grace_window_is_strict() {
    let test_db = TestDatabase::new().await;
    let account = test_db.seed_pending_account(T).await;

    // One millisecond before the grace window elapses: kept.
    let now = T + PENDING_ACCOUNT_GRACE_MS - 1;
    let deleted = test_db
        .db
        .accounts
        .delete_stale_pending(pending_cutoff(now))
        .await
        .unwrap();
    assert_eq!(deleted, 0);
    assert_eq!(
        test_db.db.accounts.fetch_status(account.id).await.unwrap(),
        Some(AccountStatus::Pending)
    );

    // One millisecond after: deleted, specialization row first.
    let now = T + PENDING_ACCOUNT_GRACE_MS + 1;
    let deleted = test_db
        .db
        .accounts
        .delete_stale_pending(pending_cutoff(now))
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(
        test_db.db.accounts.fetch_status(account.id).await.unwrap(),
        None
    );

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a migrated olives_test database"]
async fn appointment_sweep_applies_the_transition_table() {
    let test_db = TestDatabase::new().await;
    let overdue_pending = test_db
        .seed_appointment(AppointmentStatus::Pending, T - 1)
        .await;
    let overdue_active = test_db
        .seed_appointment(AppointmentStatus::Active, T - 1)
        .await;
    let overdue_cancelled = test_db
        .seed_appointment(AppointmentStatus::Cancelled, T - 1)
        .await;
    let future_pending = test_db
        .seed_appointment(AppointmentStatus::Pending, T + 60_000)
        .await;

    let updated = test_db.db.appointments.expire_overdue(T).await.unwrap();
    assert_eq!(updated, 2);

    let appointments = &test_db.db.appointments;
    assert_eq!(
        appointments.fetch_status(overdue_pending.id).await.unwrap(),
        Some(AppointmentStatus::Expired)
    );
    assert_eq!(
        appointments.fetch_status(overdue_active.id).await.unwrap(),
        Some(AppointmentStatus::Done)
    );
    // Cancelled rows are never touched regardless of their window.
    assert_eq!(
        appointments
            .fetch_status(overdue_cancelled.id)
            .await
            .unwrap(),
        Some(AppointmentStatus::Cancelled)
    );
    assert_eq!(
        appointments.fetch_status(future_pending.id).await.unwrap(),
        Some(AppointmentStatus::Pending)
    );

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a migrated olives_test database"]
async fn junk_record_deletion_reports_affected_rows() {
    let test_db = TestDatabase::new().await;
    let a = test_db.seed_junk_file("a.bin").await;
    let b = test_db.seed_junk_file("").await;
    test_db.seed_junk_file("kept.bin").await;

    let listed = test_db.db.junk_files.list().await.unwrap();
    assert!(listed.len() >= 3);

    let deleted = test_db
        .db
        .junk_files
        .delete_many(&[a.id, b.id])
        .await
        .unwrap();
    assert_eq!(deleted, 2);

    let deleted = test_db.db.junk_files.delete_many(&[]).await.unwrap();
    assert_eq!(deleted, 0);

    test_db.cleanup().await;
}
