//! SQLite connection manager.
//!
//! One [`Database`] is opened at startup and threaded explicitly through
//! repository and service construction; there is no ambient global handle.
//! Opening enables foreign-key checking and applies any pending schema
//! migrations, so a freshly opened database is always at the current schema.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, Transaction};

use crate::error::Result;
use crate::storage::migrations::run_migrations;

/// Shared, long-lived database handle.
///
/// The connection outlives any single request; isolation between
/// interleaved statements is the store's own locking (single small-team
/// scale, see the repository docs).
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database file and bring its schema up to date.
    ///
    /// Idempotent: reopening an existing file applies only migrations not
    /// yet recorded in the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// pending migration fails to apply.
    pub fn open(path: &Path) -> Result<Self> {
        Self::bootstrap(Connection::open(path)?)
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails to apply.
    pub fn open_memory() -> Result<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "foreign_keys", true)?;

        let db = Self { conn };
        run_migrations(&db)?;
        Ok(db)
    }

    /// Shared access to the underlying connection.
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run a unit of work inside a transaction.
    ///
    /// Commits when the closure returns `Ok`; any `Err` rolls back on drop
    /// and is forwarded unchanged.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a database error from begin/commit.
    pub fn transaction<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory_applies_schema() {
        let db = Database::open_memory().unwrap();
        // All three entity tables plus the ledger must exist.
        let count: i64 = db
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('clients', 'cases', 'deadlines', 'schema_migrations')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let db = Database::open_memory().unwrap();
        // A case pointing at a missing client must be rejected.
        let result = db.conn().execute(
            "INSERT INTO cases (client_id, client_ref) VALUES (999, 'X-1')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reopen_existing_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docket.db");

        {
            let db = Database::open(&path).unwrap();
            db.conn()
                .execute(
                    "INSERT INTO clients (name, country) VALUES ('Acme', 'DE')",
                    [],
                )
                .unwrap();
        }

        // Second open re-runs the migration pass against the same file.
        let db = Database::open(&path).unwrap();
        let clients: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(clients, 1);

        let duplicates: i64 = db
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM (SELECT filename FROM schema_migrations
                 GROUP BY filename HAVING COUNT(*) > 1)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(duplicates, 0);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let db = Database::open_memory().unwrap();
        let result: Result<()> = db.transaction(|tx| {
            tx.execute(
                "INSERT INTO clients (name, country) VALUES ('Acme', 'DE')",
                [],
            )?;
            Err(crate::Error::Blocked("abort".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
