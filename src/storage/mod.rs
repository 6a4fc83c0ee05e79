//! SQLite storage layer.
//!
//! # Submodules
//!
//! - [`sqlite`] - Connection manager (`Database`)
//! - [`migrations`] - Embedded schema migrations and the applied-ledger
//! - [`store`] - Table-bound generic record store

pub mod migrations;
pub mod sqlite;
pub mod store;

pub use sqlite::Database;
pub use store::RecordStore;
