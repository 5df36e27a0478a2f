//! Database schema migrations.
//!
//! Applies the initial schema: people, account_types, accounts, and the
//! schema_migrations tracking table.

use rusqlite::Connection;
use tracing::info;

use hearth_core::error::HearthError;

/// Run all pending database migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), HearthError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| HearthError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| HearthError::Storage(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
///
/// Account references to people and account_types are plain nullable
/// integers. Deletion semantics (nulling references, caller-side warnings)
/// live in the repository layer, not in SQL cascades.
fn apply_v1(conn: &Connection) -> Result<(), HearthError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS people (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            phone         TEXT,
            email         TEXT,
            photo_base64  TEXT
        );

        CREATE TABLE IF NOT EXISTS account_types (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            description   TEXT
        );

        CREATE TABLE IF NOT EXISTS accounts (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            title            TEXT NOT NULL,
            amount           REAL NOT NULL,
            is_credit        INTEGER NOT NULL DEFAULT 0,
            notes            TEXT,
            created_at       INTEGER NOT NULL,
            person_id        INTEGER,
            account_type_id  INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_accounts_person
            ON accounts (person_id);

        CREATE INDEX IF NOT EXISTS idx_accounts_type
            ON accounts (account_type_id);

        INSERT OR IGNORE INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| HearthError::Storage(format!("Failed to apply migration v1: {}", e)))?;

    Ok(())
}
