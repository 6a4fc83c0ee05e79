//! Case input model.

use serde::{Deserialize, Serialize};

/// Form data for creating or updating a case.
///
/// A case always belongs to one client (`client_id`) and carries the
/// client's own reference (`client_ref`); both are mandatory. Filing
/// metadata is optional until the case is actually filed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseInput {
    /// Identity, required for updates, ignored on insert.
    pub case_id: Option<i64>,
    /// Owning client, mandatory.
    pub client_id: Option<i64>,
    /// The client's own file reference, mandatory.
    pub client_ref: Option<String>,
    pub case_type: Option<String>,
    pub procedure_type: Option<String>,
    pub ipr_type: Option<String>,
    pub title: Option<String>,
    /// ISO-2 jurisdiction code, exactly two letters when present.
    pub jurisdiction: Option<String>,
    /// `YYYY-MM-DD` when present.
    pub filing_date: Option<String>,
    pub filing_number: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}
