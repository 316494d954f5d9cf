//! Schema definition and idempotent initialization.

use crate::{Error, Result};
use rusqlite::Connection;

/// DDL statements, executed one at a time in order.
///
/// `departments` references `employees` before that table exists; `SQLite`
/// resolves foreign key targets at statement time, not at `CREATE TABLE`.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        head_of_department_id INTEGER
            REFERENCES employees(id) ON DELETE SET NULL
    )",
    "CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        department_id INTEGER NOT NULL
            REFERENCES departments(id) ON DELETE CASCADE,
        is_supervisor INTEGER NOT NULL DEFAULT 0 CHECK (is_supervisor IN (0, 1)),
        is_head INTEGER NOT NULL DEFAULT 0 CHECK (is_head IN (0, 1)),
        position TEXT,
        hire_date TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_employees_department ON employees(department_id)",
    "CREATE TABLE IF NOT EXISTS email_subscriptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL,
        subscribed_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        status TEXT NOT NULL DEFAULT 'active'
            CHECK (status IN ('active', 'unsubscribed', 'bounced')),
        source TEXT,
        notes TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_email_subscriptions_email ON email_subscriptions(email)",
    "CREATE INDEX IF NOT EXISTS idx_email_subscriptions_status ON email_subscriptions(status)",
];

/// Creates all tables and indexes.
///
/// Safe to run on every startup. "Already exists" and constraint errors are
/// logged and skipped so that databases created by older builds still open.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] for any other DDL failure.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        if let Err(e) = conn.execute_batch(statement) {
            let message = e.to_string().to_lowercase();
            if message.contains("already exists") || message.contains("constraint") {
                tracing::debug!(error = %e, "Skipping schema statement");
                continue;
            }
            return Err(Error::OperationFailed {
                operation: "initialize_schema".to_string(),
                cause: e.to_string(),
            });
        }
    }
    Ok(())
}
