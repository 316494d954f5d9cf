//! The `SQLite`-backed record store.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use rusqlite::Connection;

use super::connection::{configure_connection, lock_connection};
use super::metrics::OperationTimer;
use super::schema::initialize_schema;
use super::sql::UpdateBuilder;
use super::op_failed;
use crate::models::UpdateOutcome;
use crate::{Error, Result};

/// Record store over a single `SQLite` file.
///
/// Holds one connection for its whole lifetime. The connection is closed when
/// the store is dropped, or explicitly via [`SqliteStore::close`].
pub struct SqliteStore {
    /// Database connection (mutex for interior mutability).
    conn: Mutex<Connection>,
    /// Path to the database file, `:memory:` for in-memory stores.
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens (or creates) the store at `db_path` and initializes the schema.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::FileAccess {
                path: parent.to_path_buf(),
                cause: e.to_string(),
            })?;
        }

        let conn = Connection::open(&db_path).map_err(op_failed("open_database"))?;
        tracing::debug!(path = %db_path.display(), "Opened database");
        Self::from_connection(conn, db_path)
    }

    /// Creates an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(op_failed("open_database_memory"))?;
        Self::from_connection(conn, PathBuf::from(":memory:"))
    }

    fn from_connection(conn: Connection, db_path: PathBuf) -> Result<Self> {
        configure_connection(&conn)?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Returns the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Closes the connection, reporting any error `SQLite` raises on close.
    ///
    /// # Errors
    ///
    /// Returns an error if outstanding statements prevent the close.
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        conn.close().map_err(|(_, e)| op_failed("close_database")(e))
    }

    /// Runs `f` with the locked connection and records metrics for it.
    pub(super) fn with_conn<T>(
        &self,
        entity: &'static str,
        operation: &'static str,
        f: impl FnOnce(&Connection) -> Result<T>,
    ) -> Result<T> {
        let timer = OperationTimer::start(entity, operation);
        let conn = lock_connection(&self.conn);
        let result = f(&conn);
        drop(conn);

        timer.finish(result.is_ok());
        if let Err(e) = &result {
            tracing::debug!(entity, operation, error = %e, "Store operation failed");
        }
        result
    }

    /// Executes a built partial update against `entity` row `id`.
    pub(super) fn apply_update(
        &self,
        entity: &'static str,
        operation: &'static str,
        id: i64,
        builder: UpdateBuilder,
    ) -> Result<UpdateOutcome> {
        if builder.is_empty() {
            return Ok(UpdateOutcome::NoChanges);
        }
        let (sql, values) = builder.build(id);
        self.with_conn(entity, operation, |conn| {
            let changed = conn
                .execute(&sql, rusqlite::params_from_iter(values.iter()))
                .map_err(op_failed(operation))?;
            Ok(if changed == 0 {
                UpdateOutcome::NotFound
            } else {
                UpdateOutcome::Applied
            })
        })
    }

    /// Deletes row `id` from `entity`.
    pub(super) fn delete_row(
        &self,
        entity: &'static str,
        operation: &'static str,
        id: i64,
    ) -> Result<bool> {
        let sql = format!("DELETE FROM {entity} WHERE id = ?1");
        self.with_conn(entity, operation, |conn| {
            let deleted = conn
                .execute(&sql, rusqlite::params![id])
                .map_err(op_failed(operation))?;
            Ok(deleted > 0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("staffmail.db");
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.db_path(), path.as_path());
        assert!(path.exists());
        store.close().unwrap();
    }

    #[test]
    fn test_reopen_existing_database() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("staffmail.db");
        SqliteStore::open(&path).unwrap().close().unwrap();
        assert!(SqliteStore::open(&path).is_ok());
    }

    #[test]
    fn test_in_memory_path() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.db_path(), Path::new(":memory:"));
    }

    #[test]
    fn test_empty_update_is_no_op() {
        let store = SqliteStore::in_memory().unwrap();
        let outcome = store
            .apply_update("departments", "update", 1, UpdateBuilder::new("departments"))
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::NoChanges);
    }
}
