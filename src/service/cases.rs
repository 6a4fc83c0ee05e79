//! Case business rules.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{text_or_null, CaseInput, Row, Value};
use crate::repo::{CasesRepo, DeadlinesRepo};
use crate::validate;

/// Validation, defaulting and lifecycle policy for cases.
///
/// Holds the deadlines repository as well: closing a case is guarded by
/// its open deadlines.
pub struct CasesService<'a> {
    cases: CasesRepo<'a>,
    deadlines: DeadlinesRepo<'a>,
}

impl<'a> CasesService<'a> {
    #[must_use]
    pub fn new(cases: CasesRepo<'a>, deadlines: DeadlinesRepo<'a>) -> Self {
        Self { cases, deadlines }
    }

    /// Collect every field violation; empty means valid.
    fn validate(input: &CaseInput) -> Vec<String> {
        let mut errors = Vec::new();

        if !input.client_id.is_some_and(|id| id > 0) {
            errors.push("Client ID is required.".to_string());
        }
        if !validate::has_text(input.client_ref.as_deref()) {
            errors.push("Client ref is required.".to_string());
        }
        if let Some(jurisdiction) = input.jurisdiction.as_deref().map(str::trim) {
            if !jurisdiction.is_empty() && !validate::is_iso2_code(jurisdiction) {
                errors.push(
                    "Jurisdiction must be two letters according to WIPO standard.".to_string(),
                );
            }
        }
        if let Some(filing_date) = input.filing_date.as_deref().map(str::trim) {
            if !filing_date.is_empty() && !validate::is_valid_date(filing_date) {
                errors.push("Filing date must be in YYYY-MM-DD format.".to_string());
            }
        }

        errors
    }

    /// Column set shared by insert and update. Optional blanks normalize to
    /// NULL; the open flag and cleared closure stamp are set on every
    /// mutation.
    fn base_fields(input: &CaseInput) -> Vec<(&'static str, Value)> {
        vec![
            ("case_type", text_or_null(input.case_type.as_deref())),
            ("procedure_type", text_or_null(input.procedure_type.as_deref())),
            ("ipr_type", text_or_null(input.ipr_type.as_deref())),
            ("client_id", Value::from(input.client_id)),
            ("client_ref", text_or_null(input.client_ref.as_deref())),
            ("title", text_or_null(input.title.as_deref())),
            ("jurisdiction", text_or_null(input.jurisdiction.as_deref())),
            ("filing_date", text_or_null(input.filing_date.as_deref())),
            ("filing_number", text_or_null(input.filing_number.as_deref())),
            ("status", text_or_null(input.status.as_deref())),
            ("notes", text_or_null(input.notes.as_deref())),
            ("is_open", Value::Integer(1)),
            ("closed_at", Value::Null),
        ]
    }

    /// All cases.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn all_cases(&self) -> Result<Vec<Row>> {
        self.cases.all()
    }

    /// Open cases.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn open_cases(&self) -> Result<Vec<Row>> {
        self.cases.open()
    }

    /// One case by identity; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn case_by_id(&self, case_id: i64) -> Result<Option<Row>> {
        self.cases.by_id(case_id)
    }

    /// Every case belonging to a client.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn cases_by_client(&self, client_id: i64) -> Result<Vec<Row>> {
        self.cases.by_client(client_id)
    }

    /// Open cases belonging to a client.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn open_cases_by_client(&self, client_id: i64) -> Result<Vec<Row>> {
        self.cases.open_by_client(client_id)
    }

    /// Cases filed in one jurisdiction. The code is validated before the
    /// query runs.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed code, or a database
    /// error.
    pub fn cases_by_jurisdiction(&self, jurisdiction: &str) -> Result<Vec<Row>> {
        if !validate::is_iso2_code(jurisdiction.trim()) {
            return Err(Error::validation(vec![
                "Jurisdiction must be two letters according to WIPO standard.".to_string(),
            ]));
        }
        self.cases.by_jurisdiction(jurisdiction.trim())
    }

    /// Cases with one procedure type.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn cases_by_procedure(&self, procedure_type: &str) -> Result<Vec<Row>> {
        self.cases.by_procedure(procedure_type)
    }

    /// Cases with one IP-right type.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn cases_by_ipr_type(&self, ipr_type: &str) -> Result<Vec<Row>> {
        self.cases.by_ipr_type(ipr_type)
    }

    /// Cases in one status.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn cases_by_status(&self, status: &str) -> Result<Vec<Row>> {
        self.cases.by_status(status)
    }

    /// Validate and insert a new case; returns the new identity.
    ///
    /// On success the row is open (`is_open = 1`) with an empty `closed_at`
    /// and `created_at = updated_at = now`.
    ///
    /// # Errors
    ///
    /// Returns an aggregated validation error (nothing written) or a
    /// database error (e.g. unknown `client_id` rejected by the foreign
    /// key).
    pub fn insert_case(&self, input: &CaseInput) -> Result<i64> {
        let errors = Self::validate(input);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        let now = crate::now_stamp();
        let mut fields = Self::base_fields(input);
        fields.push(("created_at", Value::Text(now.clone())));
        fields.push(("updated_at", Value::Text(now)));

        let id = self.cases.insert(&fields)?;
        info!(case_id = id, "Case created");
        Ok(id)
    }

    /// Validate and update an existing case; returns affected rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId`] when the identity is absent, an
    /// aggregated validation error, or a database error.
    pub fn update_case(&self, input: &CaseInput) -> Result<usize> {
        let Some(case_id) = input.case_id.filter(|id| *id > 0) else {
            return Err(Error::MissingId { entity: "Case" });
        };

        let errors = Self::validate(input);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        let mut fields = Self::base_fields(input);
        fields.push(("updated_at", Value::Text(crate::now_stamp())));

        self.cases.update(case_id, &fields)
    }

    /// Guarded transition: close a case with no open deadlines.
    ///
    /// Check-then-act over two statements; the check is authoritative for
    /// this single logical operation only (no concurrent-transition
    /// protection at this scale).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Blocked`] while open deadlines reference the case,
    /// or a database error.
    pub fn close_case(&self, case_id: i64) -> Result<usize> {
        let open_deadlines = self.deadlines.open_by_case(case_id)?;
        if !open_deadlines.is_empty() {
            warn!(
                case_id,
                open_deadlines = open_deadlines.len(),
                "Close refused"
            );
            return Err(Error::Blocked(
                "Case has open deadlines and cannot be closed.".to_string(),
            ));
        }

        let affected = self.cases.close(case_id)?;
        info!(case_id, "Case closed");
        Ok(affected)
    }
}
