//! # olives-core
//!
//! Core types, traits, and abstractions for the Olives platform.
//!
//! This crate provides the domain entities touched by the maintenance
//! service, the repository traits that concrete backends implement, and
//! the shared error and logging vocabulary used across every Olives crate.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod temporal;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use temporal::{epoch_ms, now_ms, pending_account_stale, pending_cutoff};
pub use traits::*;
