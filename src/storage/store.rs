//! Generic record store: parameterized statements against one named table.
//!
//! Repositories bind a [`RecordStore`] to their table and build every
//! statement here. Values travel exclusively through bound parameters;
//! only table and column *names* are interpolated, and those come from
//! internally fixed constants, never caller input.

use rusqlite::params_from_iter;

use crate::error::Result;
use crate::model::{Row, Value};
use crate::storage::sqlite::Database;

/// Table-bound statement executor.
pub struct RecordStore<'a> {
    db: &'a Database,
    table: &'static str,
}

impl<'a> RecordStore<'a> {
    /// Bind the store to one fixed table.
    #[must_use]
    pub fn new(db: &'a Database, table: &'static str) -> Self {
        Self { db, table }
    }

    /// The table this store is bound to.
    #[must_use]
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Run a query and return every matching row as a field-name-keyed map.
    ///
    /// An empty result is `Ok(vec![])`, never an error.
    ///
    /// # Errors
    ///
    /// Returns a database error if the statement fails.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        let mut stmt = self.db.conn().prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|&name| name.to_string())
            .collect();

        let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
            let mut record = Row::new();
            for (idx, column) in columns.iter().enumerate() {
                record.insert(column.clone(), Value::from(row.get_ref(idx)?));
            }
            Ok(record)
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Into::into)
    }

    /// Run a query and return the first row, if any.
    ///
    /// Absence is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns a database error if the statement fails.
    pub fn query_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        Ok(self.query(sql, params)?.into_iter().next())
    }

    /// Fetch one row by an equality filter on a single identity column.
    ///
    /// # Errors
    ///
    /// Returns a database error if the statement fails.
    pub fn get_by_id(&self, id_field: &str, id: i64) -> Result<Option<Row>> {
        let sql = format!("SELECT * FROM {} WHERE {id_field} = ?1", self.table);
        self.query_one(&sql, &[Value::Integer(id)])
    }

    /// Insert a record built from the given fields, columns in the order
    /// given. Returns the generated identity value.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails (e.g. constraint
    /// violation).
    pub fn insert(&self, fields: &[(&str, Value)]) -> Result<i64> {
        let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
        let placeholders: Vec<String> = (1..=fields.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        );

        let conn = self.db.conn();
        conn.execute(&sql, params_from_iter(fields.iter().map(|(_, v)| v)))?;
        Ok(conn.last_insert_rowid())
    }

    /// Update the given columns on the row matching the identity filter.
    /// Returns the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub fn update_by_id(
        &self,
        id_field: &str,
        id: i64,
        updates: &[(&str, Value)],
    ) -> Result<usize> {
        let set_clause: Vec<String> = updates
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {id_field} = ?{}",
            self.table,
            set_clause.join(", "),
            updates.len() + 1
        );

        let mut values: Vec<Value> = updates.iter().map(|(_, v)| v.clone()).collect();
        values.push(Value::Integer(id));

        let affected = self
            .db
            .conn()
            .execute(&sql, params_from_iter(values.iter()))?;
        Ok(affected)
    }

    /// Delete the row matching the identity filter.
    ///
    /// The domain lifecycle is soft-deletion, so no repository or service
    /// routes this to callers; it exists for maintenance tooling only.
    ///
    /// # Errors
    ///
    /// Returns a database error if the delete fails.
    pub fn delete_by_id(&self, id_field: &str, id: i64) -> Result<usize> {
        let sql = format!("DELETE FROM {} WHERE {id_field} = ?1", self.table);
        let affected = self.db.conn().execute(&sql, [Value::Integer(id)])?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(db: &Database) -> RecordStore<'_> {
        RecordStore::new(db, "clients")
    }

    fn insert_client(store: &RecordStore<'_>, name: &str) -> i64 {
        store
            .insert(&[("name", Value::from(name)), ("country", Value::from("DE"))])
            .unwrap()
    }

    #[test]
    fn test_query_empty_result_is_ok() {
        let db = Database::open_memory().unwrap();
        let rows = store(&db).query("SELECT * FROM clients", &[]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_query_one_absent_is_none() {
        let db = Database::open_memory().unwrap();
        let row = store(&db)
            .query_one("SELECT * FROM clients WHERE name = ?1", &[Value::from("x")])
            .unwrap();
        assert!(row.is_none());
    }

    #[test]
    fn test_insert_returns_generated_id_and_get_by_id_round_trips() {
        let db = Database::open_memory().unwrap();
        let store = store(&db);

        let id = insert_client(&store, "Acme GmbH");
        assert!(id > 0);

        let row = store.get_by_id("client_id", id).unwrap().unwrap();
        assert_eq!(row["name"], Value::from("Acme GmbH"));
        assert_eq!(row["country"], Value::from("DE"));
        // Column defaults fill in without being listed in the insert.
        assert_eq!(row["is_active"], Value::Integer(1));
    }

    #[test]
    fn test_update_by_id_reports_affected_rows() {
        let db = Database::open_memory().unwrap();
        let store = store(&db);
        let id = insert_client(&store, "Acme GmbH");

        let affected = store
            .update_by_id("client_id", id, &[("city", Value::from("Munich"))])
            .unwrap();
        assert_eq!(affected, 1);

        let affected = store
            .update_by_id("client_id", id + 100, &[("city", Value::from("Munich"))])
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[test]
    fn test_delete_by_id() {
        let db = Database::open_memory().unwrap();
        let store = store(&db);
        let id = insert_client(&store, "Acme GmbH");

        assert_eq!(store.delete_by_id("client_id", id).unwrap(), 1);
        assert!(store.get_by_id("client_id", id).unwrap().is_none());
    }

    #[test]
    fn test_constraint_violation_surfaces_as_error() {
        let db = Database::open_memory().unwrap();
        // name is NOT NULL.
        let result = store(&db).insert(&[("country", Value::from("DE"))]);
        assert!(matches!(result, Err(crate::Error::Database(_))));
    }
}
