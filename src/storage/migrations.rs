//! Schema migrations embedded at compile time.
//!
//! Migration scripts live under `/migrations/` and are embedded with
//! `include_str!`, so the library is self-contained with no runtime file
//! dependencies. They apply in filename-sort order, and each applied
//! filename is recorded exactly once in the `schema_migrations` ledger.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::storage::sqlite::Database;

/// A single migration: script filename plus its SQL content.
struct Migration {
    filename: &'static str,
    sql: &'static str,
}

/// All migrations in filename-sort order.
const MIGRATIONS: &[Migration] = &[
    Migration {
        filename: "001_create_clients.sql",
        sql: include_str!("../../migrations/001_create_clients.sql"),
    },
    Migration {
        filename: "002_create_cases.sql",
        sql: include_str!("../../migrations/002_create_cases.sql"),
    },
    Migration {
        filename: "003_create_deadlines.sql",
        sql: include_str!("../../migrations/003_create_deadlines.sql"),
    },
];

/// Apply all pending migrations.
///
/// Already-applied migrations (tracked by filename in `schema_migrations`)
/// are skipped, so this is idempotent and safe to call on every open. Each
/// migration's script and its ledger insert run in one transaction: a
/// failure leaves no half-applied, unrecorded migration behind. Migrations
/// applied earlier in the batch stay recorded.
///
/// # Errors
///
/// Returns [`Error::Migration`] naming the failing script; the batch stops
/// there.
pub fn run_migrations(db: &Database) -> Result<()> {
    // Ledger table, created on first run.
    db.conn().execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT UNIQUE NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;

    let applied: HashSet<String> = db
        .conn()
        .prepare("SELECT filename FROM schema_migrations")?
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<_>>()?;

    for migration in MIGRATIONS {
        if applied.contains(migration.filename) {
            debug!(filename = migration.filename, "Migration already applied");
            continue;
        }

        info!(filename = migration.filename, "Applying migration");

        db.transaction(|tx| {
            tx.execute_batch(migration.sql).map_err(|e| Error::Migration {
                filename: migration.filename,
                source: e,
            })?;
            tx.execute(
                "INSERT INTO schema_migrations (filename, applied_at) VALUES (?1, ?2)",
                rusqlite::params![migration.filename, crate::now_stamp()],
            )?;
            Ok(())
        })?;
    }

    Ok(())
}
