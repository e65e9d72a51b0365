//! Structured logging schema and field name constants for Olives.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), pass completions |
//! | DEBUG | Decision points, skipped records, config choices |
//! | TRACE | Per-record iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "database", "maintenance", "form"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "pool", "runner", "storage"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "expire_account_tokens", "clean_junk_files", "create"
pub const OPERATION: &str = "op";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows deleted or updated by a maintenance pass.
pub const AFFECTED_ROWS: &str = "affected_rows";

/// Number of records inspected by a scan.
pub const RECORD_COUNT: &str = "record_count";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

/// Database table or entity affected.
pub const DB_TABLE: &str = "db_table";

// ─── Maintenance fields ────────────────────────────────────────────────────

/// Maintenance pass name.
pub const PASS: &str = "pass";

/// Filesystem path of a junk file record.
pub const FILE_PATH: &str = "file_path";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
