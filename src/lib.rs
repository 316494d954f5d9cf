//! # Staffmail
//!
//! Department, employee, and email-subscription management backed by a single
//! local `SQLite` file.
//!
//! ## Features
//!
//! - Idempotent schema creation on startup
//! - CRUD for departments, employees, and email subscriptions with
//!   tri-state partial updates ([`FieldUpdate`])
//! - CSV export/import of the email list with duplicate skipping
//! - Optional XLSX export (`xlsx-export` feature, on by default)
//! - Aggregate statistics and staffing-rule checks
//!
//! ## Example
//!
//! ```rust,ignore
//! use staffmail::storage::SqliteStore;
//! use staffmail::{DepartmentBackend, EmployeeBackend, NewEmployee};
//!
//! let store = SqliteStore::open("staffmail.db")?;
//! let sales = store.create_department("Sales", None)?;
//! store.create_employee(&NewEmployee::new("Ann", "ann@x.com", sales).supervisor(true))?;
//! let staff = store.list_employees_by_department(sales)?;
//! assert_eq!(staff.len(), 1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::StaffmailConfig;
pub use models::{
    Department, DepartmentRow, DepartmentUpdate, Employee, EmployeeRow, EmployeeUpdate,
    FieldUpdate, NewEmployee, NewSubscription, Subscription, SubscriptionStatus,
    SubscriptionUpdate, UpdateOutcome,
};
pub use services::{DepartmentBreakdown, Statistics, StatisticsService};
pub use storage::{
    DepartmentBackend, EmployeeBackend, RecordStore, SqliteStore, SubscriptionBackend,
};

/// Error type for staffmail operations.
///
/// Not-found is never an error: lookups return `Option`, deletes return
/// `bool`, and updates return [`UpdateOutcome`].
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Required field empty, bad date, unknown status, duplicate department name |
/// | `OperationFailed` | `SQLite` statement fails (constraint violation, I/O), logging init fails |
/// | `FileAccess` | Import/export/config file is missing, unreadable, or unwritable |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A required field is empty after trimming
    /// - A required field is cleared in a partial update
    /// - `hire_date` is not `YYYY-MM-DD`
    /// - A subscription status is not `active`, `unsubscribed`, or `bounced`
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` statements fail (foreign key or check constraint, I/O)
    /// - CSV or XLSX encoding fails
    /// - The tracing subscriber cannot be installed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A file could not be opened, read, or written.
    #[error("cannot access '{}': {cause}", path.display())]
    FileAccess {
        /// The file involved.
        path: PathBuf,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for staffmail operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current UTC time formatted the way `SQLite`'s
/// `CURRENT_TIMESTAMP` renders it (`YYYY-MM-DD HH:MM:SS`).
#[must_use]
pub fn current_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
