//! Connection setup and locking for the `SQLite` store.

use crate::{Error, Result};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};

/// Best-effort pragmas. In-memory databases reject WAL and report `memory`.
const TUNING_PRAGMAS: [(&str, &str); 3] = [
    ("journal_mode", "WAL"),
    ("synchronous", "NORMAL"),
    ("busy_timeout", "5000"),
];

/// Locks the store connection.
///
/// A panic while the lock was held leaves every statement either committed
/// or rolled back, so a poisoned lock is recovered instead of propagated.
pub fn lock_connection(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Store connection lock was poisoned, recovering");
        metrics::counter!("storage_lock_poison_recovery_total").increment(1);
        poisoned.into_inner()
    })
}

/// Prepares a fresh connection.
///
/// Foreign keys must be enforced: department deletes cascade to employees
/// and employee deletes clear department heads. Tuning pragmas that fail are
/// logged and skipped.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if foreign key enforcement cannot be
/// turned on.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    for (name, value) in TUNING_PRAGMAS {
        if let Err(e) = conn.pragma_update(None, name, value) {
            tracing::debug!(pragma = name, error = %e, "Skipping pragma");
        }
    }

    let enforced = conn
        .pragma_update(None, "foreign_keys", "ON")
        .and_then(|()| conn.pragma_query_value(None, "foreign_keys", |row| row.get::<_, i64>(0)))
        .map_err(|e| Error::OperationFailed {
            operation: "enable_foreign_keys".to_string(),
            cause: e.to_string(),
        })?;
    if enforced != 1 {
        return Err(Error::OperationFailed {
            operation: "enable_foreign_keys".to_string(),
            cause: "SQLite build does not enforce foreign keys".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_lock_recovers_after_panic() {
        let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        let holder = Arc::clone(&conn);
        let _ = std::thread::spawn(move || {
            let _guard = holder.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(conn.is_poisoned());
        let guard = lock_connection(&conn);
        let one: i64 = guard.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
        assert_eq!(one, 1);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();

        conn.execute_batch(
            "CREATE TABLE parent (id INTEGER PRIMARY KEY);
             CREATE TABLE child (parent_id INTEGER REFERENCES parent(id));",
        )
        .unwrap();
        assert!(conn.execute("INSERT INTO child VALUES (7)", []).is_err());

        let timeout: i64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 5000);
    }
}
