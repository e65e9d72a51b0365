//! Default values shared across Olives crates.

/// Grace window before a still-pending account becomes eligible for
/// deletion, counted from its creation instant (one day, epoch ms).
pub const PENDING_ACCOUNT_GRACE_MS: i64 = 86_400_000;

/// Default base directory for durable file storage.
pub const DEFAULT_STORAGE_PATH: &str = "/var/olives/files";

/// Environment variable overriding [`DEFAULT_STORAGE_PATH`].
pub const STORAGE_PATH_ENV: &str = "OLIVES_STORAGE_PATH";
