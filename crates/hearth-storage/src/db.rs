//! Database connection management.
//!
//! Wraps a single rusqlite Connection in a Mutex. The connection is opened
//! once at startup and the handle is passed into every component that needs
//! persistence; there is no ambient global state.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use hearth_core::error::HearthError;

use crate::migrations;

/// Thread-safe SQLite database wrapper.
///
/// WAL mode is enabled on open. The usage pattern is single-writer,
/// single-reader-at-a-time; the Mutex serializes all access.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database at the given path.
    ///
    /// Configures WAL mode, synchronous=NORMAL, foreign keys, and runs all
    /// pending migrations. Running migrations again is a no-op.
    pub fn new(path: &Path) -> Result<Self, HearthError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| HearthError::Storage(format!("Failed to open database: {}", e)))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )
        .map_err(|e| HearthError::Storage(format!("Failed to set pragmas: {}", e)))?;

        info!("Database opened at {}", path.display());

        let db = Self {
            conn: Mutex::new(conn),
        };

        db.with_conn(migrations::run_migrations)?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, HearthError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| HearthError::Storage(format!("Failed to open in-memory db: {}", e)))?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| HearthError::Storage(format!("Failed to set pragmas: {}", e)))?;

        let db = Self {
            conn: Mutex::new(conn),
        };

        db.with_conn(migrations::run_migrations)?;

        Ok(db)
    }

    /// Execute a closure with a reference to the underlying connection.
    ///
    /// The mutex is held for the duration of the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, HearthError>
    where
        F: FnOnce(&Connection) -> Result<T, HearthError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| HearthError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_database() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM people", [], |row| row.get(0))
                .map_err(|e| HearthError::Storage(e.to_string()))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::new(&path).unwrap();

        db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
                .map_err(|e| HearthError::Storage(e.to_string()))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let db = Database::new(&path).unwrap();
            db.with_conn(|conn| {
                conn.execute("INSERT INTO people (name) VALUES ('Alice')", [])
                    .map_err(|e| HearthError::Storage(e.to_string()))?;
                Ok(())
            })
            .unwrap();
        }

        // Opening again re-runs migrations without touching existing data.
        let db = Database::new(&path).unwrap();
        db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM people", [], |row| row.get(0))
                .map_err(|e| HearthError::Storage(e.to_string()))?;
            assert_eq!(count, 1);
            Ok(())
        })
        .unwrap();
    }
}
