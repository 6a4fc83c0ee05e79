//! Case-management core for a patent/IP practice.
//!
//! Tracks clients, cases and filing/response deadlines over SQLite. This
//! crate is the data-access and business-rule layer; the UI renders forms
//! and lists on top of it and branches on [`Result`] at every call.
//!
//! # Architecture
//!
//! - [`model`] - Transient request structures and the generic `Row`/`Value` record types
//! - [`storage`] - Connection manager, schema migrations, generic record store
//! - [`repo`] - Per-table repositories with named queries
//! - [`service`] - Validation, default population, timestamping, guarded transitions
//! - [`validate`] - Shared field validators
//! - [`error`] - Error types and handling
//!
//! Control flow is service → repository → record store → connection. Every
//! layer forwards outcomes unchanged; nothing panics across the boundary.
//!
//! Lifecycle is soft everywhere: clients are deactivated, cases are closed,
//! deadlines are marked completed. Nothing is ever physically deleted.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod validate;

pub use error::{Error, ErrorKind, Result};

/// Timestamp format used across all tables and the migrations ledger.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time as a storage timestamp string.
pub(crate) fn now_stamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
