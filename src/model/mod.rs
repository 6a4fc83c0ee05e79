//! Transient request/response structures.
//!
//! There is no in-memory object graph: rows travel as [`record::Row`] maps
//! and mutations arrive as per-entity input structs that mirror the UI
//! forms.

pub mod case;
pub mod client;
pub mod deadline;
pub mod record;

pub use case::CaseInput;
pub use client::ClientInput;
pub use deadline::DeadlineInput;
pub use record::{row_to_json, text_or_null, Row, Value};
