//! Clients table repository.

use crate::error::Result;
use crate::model::{Row, Value};
use crate::storage::{Database, RecordStore};

const TABLE: &str = "clients";
const ID_FIELD: &str = "client_id";

/// Named queries over the `clients` table.
pub struct ClientsRepo<'a> {
    store: RecordStore<'a>,
}

impl<'a> ClientsRepo<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self {
            store: RecordStore::new(db, TABLE),
        }
    }

    /// All clients, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn all(&self) -> Result<Vec<Row>> {
        self.store
            .query("SELECT * FROM clients ORDER BY name", &[])
    }

    /// Active clients only, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn active(&self) -> Result<Vec<Row>> {
        self.store
            .query("SELECT * FROM clients WHERE is_active = 1 ORDER BY name", &[])
    }

    /// One client by identity, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub fn by_id(&self, client_id: i64) -> Result<Option<Row>> {
        self.store.get_by_id(ID_FIELD, client_id)
    }

    /// Insert a prepared field set; returns the new `client_id`.
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
    pub fn update(&self, client_id: i64, fields: &[(&str, Value)]) -> Result<usize> {
        self.store.update_by_id(ID_FIELD, client_id, fields)
    }

    /// Flip the client inactive and stamp `deactivated_at`.
    ///
    /// The referential guard lives in the service layer; this is the raw
    /// column write.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn deactivate(&self, client_id: i64) -> Result<usize> {
        self.store.update_by_id(
            ID_FIELD,
            client_id,
            &[
                ("is_active", Value::Integer(0)),
                ("deactivated_at", Value::Text(crate::now_stamp())),
            ],
        )
    }
}
