//! Deadline business rules.

use tracing::info;

use crate::error::{Error, Result};
use crate::model::{text_or_null, DeadlineInput, Row, Value};
use crate::repo::DeadlinesRepo;
use crate::validate;

/// Validation, defaulting and lifecycle policy for deadlines.
///
/// Completion needs no cross-entity guard: nothing depends on a deadline
/// being done.
pub struct DeadlinesService<'a> {
    deadlines: DeadlinesRepo<'a>,
}

impl<'a> DeadlinesService<'a> {
    #[must_use]
    pub fn new(deadlines: DeadlinesRepo<'a>) -> Self {
        Self { deadlines }
    }

    /// Collect every field violation; empty means valid.
    ///
    /// A past due date is rejected on insert and update alike: the docket
    /// only tracks upcoming work.
    fn validate(input: &DeadlineInput) -> Vec<String> {
        let mut errors = Vec::new();

        if !input.case_id.is_some_and(|id| id > 0) {
            errors.push("Case ID is required.".to_string());
        }
        if !validate::has_text(input.description.as_deref()) {
            errors.push("Description is required.".to_string());
        }

        match input.due_date.as_deref().map(str::trim) {
            None | Some("") => errors.push("Due date is required.".to_string()),
            Some(due_date) => match validate::parse_date(due_date) {
                None => errors.push("Due date must be in YYYY-MM-DD format.".to_string()),
                Some(date) if date < chrono::Local::now().date_naive() => {
                    errors.push("Due date cannot be in the past.".to_string());
                }
                Some(_) => {}
            },
        }

        match input.deadline_type.as_deref().map(str::trim) {
            None | Some("") => errors.push("Deadline type is required.".to_string()),
            Some(deadline_type) if !validate::is_valid_deadline_type(deadline_type) => {
                errors.push(
                    "Deadline type must be one of: statutory, client, internal.".to_string(),
                );
            }
            Some(_) => {}
        }

        if !validate::has_text(input.status.as_deref()) {
            errors.push("Status is required.".to_string());
        }

        errors
    }

    /// Column set shared by insert and update. Every mutation resets the
    /// completion state: an edited deadline is open again.
    fn base_fields(input: &DeadlineInput) -> Vec<(&'static str, Value)> {
        vec![
            ("case_id", Value::from(input.case_id)),
            ("description", text_or_null(input.description.as_deref())),
            ("due_date", text_or_null(input.due_date.as_deref())),
            ("deadline_type", text_or_null(input.deadline_type.as_deref())),
            ("status", text_or_null(input.status.as_deref())),
            ("completed", Value::Integer(0)),
            ("completed_at", Value::Null),
        ]
    }

    /// All deadlines, ordered by due date.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn all_deadlines(&self) -> Result<Vec<Row>> {
        self.deadlines.all()
    }

    /// Open deadlines, ordered by due date.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn open_deadlines(&self) -> Result<Vec<Row>> {
        self.deadlines.open()
    }

    /// Open deadlines on one case, ordered by due date.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn open_deadlines_by_case(&self, case_id: i64) -> Result<Vec<Row>> {
        self.deadlines.open_by_case(case_id)
    }

    /// One deadline by identity; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn deadline_by_id(&self, deadline_id: i64) -> Result<Option<Row>> {
        self.deadlines.by_id(deadline_id)
    }

    /// Validate and insert a new deadline; returns the new identity.
    ///
    /// On success the row is open (`completed = 0`) with an empty
    /// `completed_at` and `created_at = updated_at = now`.
    ///
    /// # Errors
    ///
    /// Returns an aggregated validation error (nothing written) or a
    /// database error (e.g. unknown `case_id` rejected by the foreign
    /// key).
    pub fn insert_deadline(&self, input: &DeadlineInput) -> Result<i64> {
        let errors = Self::validate(input);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        let now = crate::now_stamp();
        let mut fields = Self::base_fields(input);
        fields.push(("created_at", Value::Text(now.clone())));
        fields.push(("updated_at", Value::Text(now)));

        let id = self.deadlines.insert(&fields)?;
        info!(deadline_id = id, "Deadline created");
        Ok(id)
    }

    /// Validate and update an existing deadline; returns affected rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId`] when the identity is absent, an
    /// aggregated validation error, or a database error.
    pub fn update_deadline(&self, input: &DeadlineInput) -> Result<usize> {
        let Some(deadline_id) = input.deadline_id.filter(|id| *id > 0) else {
            return Err(Error::MissingId { entity: "Deadline" });
        };

        let errors = Self::validate(input);
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        let mut fields = Self::base_fields(input);
        fields.push(("updated_at", Value::Text(crate::now_stamp())));

        self.deadlines.update(deadline_id, &fields)
    }

    /// Unconditional flag flip: mark the deadline completed and stamp the
    /// completion time.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn mark_deadline_completed(&self, deadline_id: i64) -> Result<usize> {
        let affected = self.deadlines.mark_completed(deadline_id)?;
        info!(deadline_id, "Deadline completed");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::{
        case_input, client_input, deadline_input, services_db,
    };
    use crate::service::Services;

    fn fixture_case(services: &Services<'_>) -> i64 {
        let client_id = services
            .clients
            .insert_client(&client_input("Acme GmbH"))
            .unwrap();
        services.cases.insert_case(&case_input(client_id)).unwrap()
    }

    #[test]
    fn test_round_trip_insert_and_fetch() {
        let db = services_db();
        let services = Services::new(&db);
        let case_id = fixture_case(&services);

        let id = services
            .deadlines
            .insert_deadline(&deadline_input(case_id, "2030-01-01"))
            .unwrap();
        assert!(id > 0);

        let row = services.deadlines.deadline_by_id(id).unwrap().unwrap();
        assert_eq!(row["completed"], Value::Integer(0));
        assert_eq!(row["due_date"], Value::from("2030-01-01"));
        assert_eq!(row["deadline_type"], Value::from("statutory"));
        assert_eq!(row["status"], Value::from("Pending"));
        assert!(row["completed_at"].is_null());
    }

    #[test]
    fn test_insert_collects_all_violations() {
        let db = services_db();
        let services = Services::new(&db);

        let err = services
            .deadlines
            .insert_deadline(&DeadlineInput::default())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Case ID is required."));
        assert!(msg.contains("Description is required."));
        assert!(msg.contains("Due date is required."));
        assert!(msg.contains("Deadline type is required."));
        assert!(msg.contains("Status is required."));
        assert!(services.deadlines.all_deadlines().unwrap().is_empty());
    }

    #[test]
    fn test_insert_rejects_malformed_and_past_due_dates() {
        let db = services_db();
        let services = Services::new(&db);
        let case_id = fixture_case(&services);

        let err = services
            .deadlines
            .insert_deadline(&deadline_input(case_id, "01-06-2030"))
            .unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));

        let err = services
            .deadlines
            .insert_deadline(&deadline_input(case_id, "2001-01-01"))
            .unwrap_err();
        assert!(err.to_string().contains("cannot be in the past"));
    }

    #[test]
    fn test_insert_rejects_unknown_deadline_type() {
        let db = services_db();
        let services = Services::new(&db);
        let case_id = fixture_case(&services);

        let mut input = deadline_input(case_id, "2030-01-01");
        input.deadline_type = Some("urgent".to_string());
        let err = services.deadlines.insert_deadline(&input).unwrap_err();
        assert!(err.to_string().contains("statutory, client, internal"));
    }

    #[test]
    fn test_update_requires_identity_and_reopens() {
        let db = services_db();
        let services = Services::new(&db);
        let case_id = fixture_case(&services);

        let err = services
            .deadlines
            .update_deadline(&deadline_input(case_id, "2030-01-01"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingId { entity: "Deadline" }));

        let id = services
            .deadlines
            .insert_deadline(&deadline_input(case_id, "2030-01-01"))
            .unwrap();
        services.deadlines.mark_deadline_completed(id).unwrap();

        // Editing a completed deadline puts it back on the docket.
        let mut input = deadline_input(case_id, "2030-02-01");
        input.deadline_id = Some(id);
        assert_eq!(services.deadlines.update_deadline(&input).unwrap(), 1);

        let row = services.deadlines.deadline_by_id(id).unwrap().unwrap();
        assert_eq!(row["completed"], Value::Integer(0));
        assert!(row["completed_at"].is_null());
        assert_eq!(row["due_date"], Value::from("2030-02-01"));
    }

    #[test]
    fn test_mark_completed_sets_flag_status_and_stamp() {
        let db = services_db();
        let services = Services::new(&db);
        let case_id = fixture_case(&services);
        let id = services
            .deadlines
            .insert_deadline(&deadline_input(case_id, "2030-01-01"))
            .unwrap();

        assert_eq!(services.deadlines.mark_deadline_completed(id).unwrap(), 1);

        let row = services.deadlines.deadline_by_id(id).unwrap().unwrap();
        assert_eq!(row["completed"], Value::Integer(1));
        assert_eq!(row["status"], Value::from("Done"));
        assert!(!row["completed_at"].is_null());
    }

    #[test]
    fn test_open_by_case_orders_ascending_and_excludes_completed() {
        let db = services_db();
        let services = Services::new(&db);
        let case_id = fixture_case(&services);

        services
            .deadlines
            .insert_deadline(&deadline_input(case_id, "2031-05-01"))
            .unwrap();
        services
            .deadlines
            .insert_deadline(&deadline_input(case_id, "2030-02-01"))
            .unwrap();
        let done = services
            .deadlines
            .insert_deadline(&deadline_input(case_id, "2030-01-01"))
            .unwrap();
        services.deadlines.mark_deadline_completed(done).unwrap();

        let open = services.deadlines.open_deadlines_by_case(case_id).unwrap();
        let due_dates: Vec<&str> = open
            .iter()
            .map(|row| row["due_date"].as_str().unwrap())
            .collect();
        assert_eq!(due_dates, vec!["2030-02-01", "2031-05-01"]);
    }
}
