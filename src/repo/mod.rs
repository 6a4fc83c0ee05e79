//! Per-table repositories.
//!
//! Each repository binds the generic [`crate::storage::RecordStore`] to one
//! table and exposes named, intention-revealing queries in place of ad-hoc
//! SQL at the service layer. Query orderings are part of the contract: the
//! UI relies on them for stable display.

pub mod cases;
pub mod clients;
pub mod deadlines;

pub use cases::CasesRepo;
pub use clients::ClientsRepo;
pub use deadlines::DeadlinesRepo;
