//! Deadlines table repository.

use crate::error::Result;
use crate::model::{Row, Value};
use crate::storage::{Database, RecordStore};

const TABLE: &str = "deadlines";
const ID_FIELD: &str = "deadline_id";

/// Named queries over the `deadlines` table.
///
/// Every listing orders by `due_date` ascending: the docket view shows the
/// most urgent deadline first.
pub struct DeadlinesRepo<'a> {
    store: RecordStore<'a>,
}

impl<'a> DeadlinesRepo<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self {
            store: RecordStore::new(db, TABLE),
        }
    }

    /// All deadlines, ordered by due date.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn all(&self) -> Result<Vec<Row>> {
        self.store
            .query("SELECT * FROM deadlines ORDER BY due_date", &[])
    }

    /// One deadline by identity, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn by_id(&self, deadline_id: i64) -> Result<Option<Row>> {
        self.store.get_by_id(ID_FIELD, deadline_id)
    }

    /// Open deadlines (`completed = 0`), ordered by due date.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn open(&self) -> Result<Vec<Row>> {
        self.store.query(
            "SELECT * FROM deadlines WHERE completed = 0 ORDER BY due_date",
            &[],
        )
    }

    /// Open deadlines on one case, ordered by due date. Feeds the
    /// close-case guard.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn open_by_case(&self, case_id: i64) -> Result<Vec<Row>> {
        self.store.query(
            "SELECT * FROM deadlines WHERE completed = 0 AND case_id = ?1 ORDER BY due_date",
            &[Value::Integer(case_id)],
        )
    }

    /// Insert a prepared field set; returns the new `deadline_id`.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub fn insert(&self, fields: &[(&str, Value)]) -> Result<i64> {
        self.store.insert(fields)
    }

    /// Update a prepared field set by identity; returns affected rows.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn update(&self, deadline_id: i64, fields: &[(&str, Value)]) -> Result<usize> {
        self.store.update_by_id(ID_FIELD, deadline_id, fields)
    }

    /// Flip the deadline completed: `completed = 1`, status `Done`,
    /// `completed_at` stamped.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn mark_completed(&self, deadline_id: i64) -> Result<usize> {
        self.store.update_by_id(
            ID_FIELD,
            deadline_id,
            &[
                ("completed", Value::Integer(1)),
                ("status", Value::from("Done")),
                ("completed_at", Value::Text(crate::now_stamp())),
            ],
        )
    }
}
