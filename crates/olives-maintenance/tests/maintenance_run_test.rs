//! Behavioral tests for the maintenance runner against in-memory
//! fakes, plus a junk file sweep against the real filesystem backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use olives_core::{
    AccountRepository, AccountTokenRepository, AppointmentRepository, Error, JunkFile,
    JunkFileRepository, Result, StorageBackend,
};
use olives_db::FilesystemBackend;
use olives_maintenance::{passes, MaintenanceRunner, Pass, PassOutcome};

type CallLog = Arc<Mutex<Vec<&'static str>>>;

/// Repository fake that pops a scripted result per call, recording the
/// call in a shared log. An exhausted script answers `Ok(0)`.
macro_rules! scripted_repo {
    ($name:ident, $trait:ident, $method:ident, $label:literal) => {
        struct $name {
            calls: CallLog,
            results: Mutex<VecDeque<Result<u64>>>,
        }

        impl $name {
            fn new(calls: CallLog, results: Vec<Result<u64>>) -> Self {
                Self {
                    calls,
                    results: Mutex::new(results.into_iter().collect()),
                }
            }
        }

        #[async_trait]
        impl $trait for $name {
            async fn $method(&self, _instant_ms: i64) -> Result<u64> {
                self.calls.lock().unwrap().push($label);
                self.results.lock().unwrap().pop_front().unwrap_or(Ok(0))
            }
        }
    };
}

scripted_repo!(ScriptedTokens, AccountTokenRepository, delete_expired, "account_tokens");
scripted_repo!(ScriptedAccounts, AccountRepository, delete_stale_pending, "pending_accounts");
scripted_repo!(ScriptedAppointments, AppointmentRepository, expire_overdue, "appointments");

struct InMemoryJunk {
    calls: CallLog,
    records: Mutex<Vec<JunkFile>>,
    deleted: Mutex<Vec<Uuid>>,
    fail_list: bool,
    fail_delete: bool,
}

impl InMemoryJunk {
    fn new(calls: CallLog, records: Vec<JunkFile>) -> Self {
        Self {
            calls,
            records: Mutex::new(records),
            deleted: Mutex::new(Vec::new()),
            fail_list: false,
            fail_delete: false,
        }
    }
}

#[async_trait]
impl JunkFileRepository for InMemoryJunk {
    async fn list(&self) -> Result<Vec<JunkFile>> {
        self.calls.lock().unwrap().push("junk_files");
        if self.fail_list {
            return Err(Error::Internal("listing failed".into()));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64> {
        if self.fail_delete {
            return Err(Error::Internal("record deletion failed".into()));
        }
        self.deleted.lock().unwrap().extend_from_slice(ids);
        self.records
            .lock()
            .unwrap()
            .retain(|r| !ids.contains(&r.id));
        Ok(ids.len() as u64)
    }
}

/// Storage fake backed by an in-memory path set, recording every call.
#[derive(Default)]
struct RecordingStorage {
    present: Mutex<Vec<String>>,
    exists_calls: Mutex<Vec<String>>,
    delete_calls: Mutex<Vec<String>>,
    fail_delete_paths: Vec<String>,
}

impl RecordingStorage {
    fn with_files(paths: &[&str]) -> Self {
        Self {
            present: Mutex::new(paths.iter().map(|p| p.to_string()).collect()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl StorageBackend for RecordingStorage {
    async fn exists(&self, path: &str) -> Result<bool> {
        self.exists_calls.lock().unwrap().push(path.to_string());
        Ok(self.present.lock().unwrap().iter().any(|p| p == path))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.delete_calls.lock().unwrap().push(path.to_string());
        if self.fail_delete_paths.iter().any(|p| p == path) {
            return Err(Error::Storage(format!("delete({path}): device busy")));
        }
        self.present.lock().unwrap().retain(|p| p != path);
        Ok(())
    }
}

fn junk(path: &str) -> JunkFile {
    JunkFile {
        id: Uuid::new_v4(),
        path: path.to_string(),
        size_bytes: 1,
        created_ms: 0,
    }
}

fn runner(
    calls: &CallLog,
    tokens: Vec<Result<u64>>,
    accounts: Vec<Result<u64>>,
    appointments: Vec<Result<u64>>,
    junk_records: Vec<JunkFile>,
) -> MaintenanceRunner {
    MaintenanceRunner::new(
        Arc::new(ScriptedTokens::new(calls.clone(), tokens)),
        Arc::new(ScriptedAccounts::new(calls.clone(), accounts)),
        Arc::new(ScriptedAppointments::new(calls.clone(), appointments)),
        Arc::new(InMemoryJunk::new(calls.clone(), junk_records)),
        Arc::new(RecordingStorage::default()),
    )
}

#[tokio::test]
async fn passes_run_in_fixed_order() {
    let calls: CallLog = Arc::default();
    let runner = runner(&calls, vec![Ok(1)], vec![Ok(1)], vec![Ok(1)], vec![]);

    let report = runner.run_once().await;

    assert_eq!(
        *calls.lock().unwrap(),
        ["account_tokens", "pending_accounts", "appointments", "junk_files"]
    );
    let order: Vec<Pass> = report.passes.iter().map(|p| p.pass).collect();
    assert_eq!(order, Pass::ALL);
}

#[tokio::test]
async fn failed_pass_is_recorded_and_the_run_continues() {
    let calls: CallLog = Arc::default();
    let runner = runner(
        &calls,
        vec![Err(Error::Internal("connection reset".into()))],
        vec![Ok(2)],
        vec![Ok(1)],
        vec![],
    );

    let report = runner.run_once().await;

    // All four passes still ran.
    assert_eq!(calls.lock().unwrap().len(), 4);
    assert_eq!(report.passes.len(), 4);

    let first = &report.passes[0];
    assert_eq!(first.pass, Pass::AccountTokens);
    match &first.outcome {
        PassOutcome::Failed { error } => assert!(error.contains("connection reset")),
        other => panic!("expected a failed pass, got {other:?}"),
    }
    // A failed pass contributes zero to the totals.
    assert_eq!(first.outcome.affected(), 0);
    assert_eq!(report.total_affected(), 3);
    assert_eq!(report.failure_count(), 1);
}

#[tokio::test]
async fn second_run_finds_nothing_left_to_do() {
    let calls: CallLog = Arc::default();
    let runner = runner(&calls, vec![Ok(4), Ok(0)], vec![], vec![], vec![]);

    assert_eq!(runner.run_once().await.total_affected(), 4);
    assert_eq!(runner.run_once().await.total_affected(), 0);
}

#[tokio::test]
async fn junk_sweep_handles_blank_missing_present_and_stuck_records() {
    let calls: CallLog = Arc::default();
    let blank = junk("  ");
    let missing = junk("ghost.bin");
    let present = junk("report.pdf");
    let stuck = junk("locked.bin");

    let repo = InMemoryJunk::new(
        calls,
        vec![blank.clone(), missing.clone(), present.clone(), stuck.clone()],
    );
    let storage = RecordingStorage {
        fail_delete_paths: vec!["locked.bin".to_string()],
        ..RecordingStorage::with_files(&["report.pdf", "locked.bin"])
    };

    let outcome = passes::clean_junk_files(&repo, &storage).await;

    // Blank, missing, and present records go; the stuck one is kept
    // for the next run.
    assert_eq!(outcome, PassOutcome::Completed { affected: 3 });
    assert_eq!(
        *repo.deleted.lock().unwrap(),
        [blank.id, missing.id, present.id]
    );
    let remaining = repo.records.lock().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, stuck.id);

    // Blank paths never touch storage.
    assert_eq!(*storage.exists_calls.lock().unwrap(), ["ghost.bin", "report.pdf", "locked.bin"]);
    assert_eq!(*storage.delete_calls.lock().unwrap(), ["report.pdf", "locked.bin"]);
}

#[tokio::test]
async fn junk_listing_failure_fails_the_pass_without_touching_storage() {
    let calls: CallLog = Arc::default();
    let mut repo = InMemoryJunk::new(calls, vec![junk("a.bin")]);
    repo.fail_list = true;
    let storage = RecordingStorage::with_files(&["a.bin"]);

    let outcome = passes::clean_junk_files(&repo, &storage).await;

    assert!(outcome.is_failed());
    assert!(storage.exists_calls.lock().unwrap().is_empty());
    assert!(storage.delete_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn junk_record_deletion_failure_fails_the_pass() {
    let calls: CallLog = Arc::default();
    let mut repo = InMemoryJunk::new(calls, vec![junk("a.bin")]);
    repo.fail_delete = true;
    let storage = RecordingStorage::with_files(&["a.bin"]);

    let outcome = passes::clean_junk_files(&repo, &storage).await;

    match outcome {
        PassOutcome::Failed { error } => assert!(error.contains("record deletion failed")),
        other => panic!("expected a failed pass, got {other:?}"),
    }
}

#[tokio::test]
async fn junk_sweep_deletes_real_files_through_the_filesystem_backend() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("upload.tmp"), b"x").unwrap();
    let backend = FilesystemBackend::new(dir.path());

    let calls: CallLog = Arc::default();
    let on_disk = junk("upload.tmp");
    let orphan = junk("orphan.tmp");
    let repo = InMemoryJunk::new(calls, vec![on_disk, orphan]);

    let outcome = passes::clean_junk_files(&repo, &backend).await;

    assert_eq!(outcome, PassOutcome::Completed { affected: 2 });
    assert!(!dir.path().join("upload.tmp").exists());
    assert!(repo.records.lock().unwrap().is_empty());
}
