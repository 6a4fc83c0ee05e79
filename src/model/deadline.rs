//! Deadline input model.

use serde::{Deserialize, Serialize};

/// Form data for creating or updating a deadline.
///
/// Every field except the identity is mandatory: a deadline without a due
/// date or description is useless to the docket. `deadline_type` is one of
/// `statutory`, `client`, `internal`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeadlineInput {
    /// Identity, required for updates, ignored on insert.
    pub deadline_id: Option<i64>,
    /// Owning case, mandatory.
    pub case_id: Option<i64>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`, must not lie in the past.
    pub due_date: Option<String>,
    pub deadline_type: Option<String>,
    pub status: Option<String>,
}
