//! Cases table repository.

use crate::error::Result;
use crate::model::{Row, Value};
use crate::storage::{Database, RecordStore};

const TABLE: &str = "cases";
const ID_FIELD: &str = "case_id";

/// Named queries over the `cases` table.
pub struct CasesRepo<'a> {
    store: RecordStore<'a>,
}

impl<'a> CasesRepo<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self {
            store: RecordStore::new(db, TABLE),
        }
    }

    /// All cases.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn all(&self) -> Result<Vec<Row>> {
        self.store.query("SELECT * FROM cases", &[])
    }

    /// One case by identity, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn by_id(&self, case_id: i64) -> Result<Option<Row>> {
        self.store.get_by_id(ID_FIELD, case_id)
    }

    /// Open cases (`is_open = 1`).
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn open(&self) -> Result<Vec<Row>> {
        self.store.query("SELECT * FROM cases WHERE is_open = 1", &[])
    }

    /// Every case belonging to a client.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn by_client(&self, client_id: i64) -> Result<Vec<Row>> {
        self.store.query(
            "SELECT * FROM cases WHERE client_id = ?1",
            &[Value::Integer(client_id)],
        )
    }

    /// Open cases belonging to a client. Feeds the deactivate-client guard.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn open_by_client(&self, client_id: i64) -> Result<Vec<Row>> {
        self.store.query(
            "SELECT * FROM cases WHERE client_id = ?1 AND is_open = 1",
            &[Value::Integer(client_id)],
        )
    }

    /// Cases filed in one jurisdiction.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn by_jurisdiction(&self, jurisdiction: &str) -> Result<Vec<Row>> {
        self.store.query(
            "SELECT * FROM cases WHERE jurisdiction = ?1",
            &[Value::from(jurisdiction)],
        )
    }

    /// Cases with one procedure type.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn by_procedure(&self, procedure_type: &str) -> Result<Vec<Row>> {
        self.store.query(
            "SELECT * FROM cases WHERE procedure_type = ?1",
            &[Value::from(procedure_type)],
        )
    }

    /// Cases with one IP-right type.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn by_ipr_type(&self, ipr_type: &str) -> Result<Vec<Row>> {
        self.store.query(
            "SELECT * FROM cases WHERE ipr_type = ?1",
            &[Value::from(ipr_type)],
        )
    }

    /// Cases in one status.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn by_status(&self, status: &str) -> Result<Vec<Row>> {
        self.store.query(
            "SELECT * FROM cases WHERE status = ?1",
            &[Value::from(status)],
        )
    }

    /// Insert a prepared field set; returns the new `case_id`.
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
    pub fn update(&self, case_id: i64, fields: &[(&str, Value)]) -> Result<usize> {
        self.store.update_by_id(ID_FIELD, case_id, fields)
    }

    /// Flip the case closed and stamp `closed_at`.
    ///
    /// The open-deadlines guard lives in the service layer; this is the raw
    /// column write.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn close(&self, case_id: i64) -> Result<usize> {
        self.store.update_by_id(
            ID_FIELD,
            case_id,
            &[
                ("is_open", Value::Integer(0)),
                ("closed_at", Value::Text(crate::now_stamp())),
            ],
        )
    }
}
