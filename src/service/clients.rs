//! Client business rules.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{text_or_null, ClientInput, Row, Value};
use crate::repo::{CasesRepo, ClientsRepo};
use crate::validate;

/// Validation, defaulting and lifecycle policy for clients.
///
/// Holds the cases repository as well: deactivation is a cross-entity
/// guard no single repository can see.
pub struct ClientsService<'a> {
    clients: ClientsRepo<'a>,
    cases: CasesRepo<'a>,
}

impl<'a> ClientsService<'a> {
    #[must_use]
    pub fn new(clients: ClientsRepo<'a>, cases: CasesRepo<'a>) -> Self {
        Self { clients, cases }
    }

    /// Collect every field violation; empty means valid.
    fn validate(input: &ClientInput) -> Vec<String> {
        let mut errors = Vec::new();

        if !validate::has_text(input.name.as_deref()) {
            errors.push("Client name is required.".to_string());
        }

        match input.country.as_deref().map(str::trim) {
            None | Some("") => errors.push("Country is required.".to_string()),
            Some(country) if !validate::is_iso2_code(country) => {
                errors.push("Country must be two letters according to WIPO standard.".to_string());
            }
            Some(_) => {}
        }

        if let Some(email) = input.email.as_deref().map(str::trim) {
            if !email.is_empty() && !validate::is_valid_email(email) {
                errors.push("Email address is not valid.".to_string());
            }
        }

        errors
    }

    /// Column set shared by insert and update. Optional blanks normalize to
    /// NULL; the active flag and cleared deactivation stamp are set on
    /// every mutation.
    fn base_fields(input: &ClientInput) -> Vec<(&'static str, Value)> {
        vec![
            ("name", text_or_null(input.name.as_deref())),
            ("client_code", text_or_null(input.client_code.as_deref())),
            ("address", text_or_null(input.address.as_deref())),
            ("zip_code", text_or_null(input.zip_code.as_deref())),
            ("city", text_or_null(input.city.as_deref())),
            ("country", text_or_null(input.country.as_deref())),
            ("email", text_or_null(input.email.as_deref())),
            ("phone", text_or_null(input.phone.as_deref())),
            ("vat_number", text_or_null(input.vat_number.as_deref())),
            ("payment_term", text_or_null(input.payment_term.as_deref())),
            ("notes", text_or_null(input.notes.as_deref())),
            ("is_active", Value::Integer(1)),
            ("deactivated_at", Value::Null),
        ]
    }

    /// All clients, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn all_clients(&self) -> Result<Vec<Row>> {
        self.clients.all()
    }

    /// Active clients, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn active_clients(&self) -> Result<Vec<Row>> {
        self.clients.active()
    }

    /// One client by identity; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn client_by_id(&self, client_id: i64) -> Result<Option<Row>> {
        self.clients.by_id(client_id)
    }

    /// Validate and insert a new client; returns the new identity.
    ///
    /// On success the row is active (`is_active = 1`) with an empty
    /// `deactivated_at` and `created_at = updated_at = now`.
    ///
    /// # Errors
    ///
    /// Returns an aggregated validation error (nothing written) or a
    /// database error.
    pub fn insert_client(&self, input: &ClientInput) -> Result<i64> {
        let errors = Self::validate(input);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        let now = crate::now_stamp();
        let mut fields = Self::base_fields(input);
        fields.push(("created_at", Value::Text(now.clone())));
        fields.push(("updated_at", Value::Text(now)));

        let id = self.clients.insert(&fields)?;
        info!(client_id = id, "Client created");
        Ok(id)
    }

    /// Validate and update an existing client; returns affected rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId`] when the identity is absent, an
    /// aggregated validation error, or a database error.
    pub fn update_client(&self, input: &ClientInput) -> Result<usize> {
        let Some(client_id) = input.client_id.filter(|id| *id > 0) else {
            return Err(Error::MissingId { entity: "Client" });
        };

        let errors = Self::validate(input);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        let mut fields = Self::base_fields(input);
        fields.push(("updated_at", Value::Text(crate::now_stamp())));

        self.clients.update(client_id, &fields)
    }

    /// Guarded transition: deactivate a client with no open cases.
    ///
    /// Check-then-act: open cases are read first, and a non-empty result
    /// refuses the transition with nothing written. The check is
    /// authoritative for this single logical operation only; there is no
    /// protection against a concurrent insert between check and write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Blocked`] while open cases reference the client, or
    /// a database error.
    pub fn deactivate_client(&self, client_id: i64) -> Result<usize> {
        let open_cases = self.cases.open_by_client(client_id)?;
        if !open_cases.is_empty() {
            warn!(
                client_id,
                open_cases = open_cases.len(),
                "Deactivation refused"
            );
            return Err(Error::Blocked(
                "Client has open cases and cannot be deactivated.".to_string(),
            ));
        }

        let affected = self.clients.deactivate(client_id)?;
        info!(client_id, "Client deactivated");
        Ok(affected)
    }
}
