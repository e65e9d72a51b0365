//! # olives-db
//!
//! PostgreSQL database layer for the Olives platform.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for the entities the maintenance
//!   service touches (account tokens, accounts, appointments, junk
//!   file records)
//! - A filesystem storage backend for durable file operations
//!
//! ## Example
//!
//! ```rust,ignore
//! use olives_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/olives").await?;
//!     let deleted = db.tokens.delete_expired(olives_core::now_ms()).await?;
//!     println!("deleted {deleted} expired tokens");
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod appointments;
pub mod junk_files;
pub mod pool;
pub mod storage;
pub mod tokens;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use olives_core::*;

// Re-export repository implementations
pub use accounts::PgAccountRepository;
pub use appointments::PgAppointmentRepository;
pub use junk_files::PgJunkFileRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use storage::FilesystemBackend;
pub use tokens::PgAccountTokenRepository;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::PgPool,
    /// Account token repository.
    pub tokens: PgAccountTokenRepository,
    /// Account repository.
    pub accounts: PgAccountRepository,
    /// Appointment repository.
    pub appointments: PgAppointmentRepository,
    /// Junk file record repository.
    pub junk_files: PgJunkFileRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            tokens: PgAccountTokenRepository::new(pool.clone()),
            accounts: PgAccountRepository::new(pool.clone()),
            appointments: PgAppointmentRepository::new(pool.clone()),
            junk_files: PgJunkFileRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}
