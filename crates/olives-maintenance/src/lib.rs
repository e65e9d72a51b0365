//! # olives-maintenance
//!
//! Periodic maintenance service for the Olives platform.
//!
//! One run executes four passes in a fixed order:
//! 1. delete expired account tokens
//! 2. delete pending accounts past their grace window
//! 3. transition overdue appointments
//! 4. remove junk file records and their backing files
//!
//! A failing pass is logged and recorded in the [`RunReport`]; it never
//! aborts the run. The binary in `main.rs` performs a single run and
//! exits, leaving the cadence to an external scheduler (cron, systemd
//! timer, or a Kubernetes CronJob).

pub mod outcome;
pub mod passes;
pub mod runner;

pub use outcome::{Pass, PassOutcome, PassReport, RunReport};
pub use runner::MaintenanceRunner;
