//! Maintenance service entry point.
//!
//! Performs one maintenance run and exits; scheduling is external.
//!
//! Configuration comes from the environment (a `.env` file is honored):
//! - `DATABASE_URL` (required)
//! - `OLIVES_STORAGE_PATH` (defaults to `/var/olives/files`)
//! - `RUST_LOG` filter and `LOG_FORMAT=json` for machine-readable logs

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use olives_core::defaults;
use olives_db::{Database, FilesystemBackend};
use olives_maintenance::MaintenanceRunner;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            error!(
                subsystem = "maintenance",
                component = "main",
                "DATABASE_URL is not set"
            );
            std::process::exit(1);
        }
    };
    let storage_path = std::env::var(defaults::STORAGE_PATH_ENV)
        .unwrap_or_else(|_| defaults::DEFAULT_STORAGE_PATH.to_string());

    let db = match Database::connect(&database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!(
                subsystem = "maintenance",
                component = "main",
                error = %e,
                "Failed to connect to the database"
            );
            std::process::exit(1);
        }
    };

    let backend = FilesystemBackend::new(storage_path.as_str());
    if let Err(e) = backend.validate().await {
        // Not fatal: the junk file pass keeps unreachable records for
        // the next run.
        warn!(
            subsystem = "maintenance",
            component = "main",
            storage_path = %storage_path,
            error = %e,
            "Storage backend check failed"
        );
    }

    let runner = MaintenanceRunner::from_database(&db, Arc::new(backend));
    let report = runner.run_once().await;

    info!(
        subsystem = "maintenance",
        component = "main",
        affected_rows = report.total_affected(),
        failed_passes = report.failure_count(),
        "Maintenance service finished"
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("olives_maintenance=info,olives_db=info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
