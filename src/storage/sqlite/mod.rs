//! `SQLite` record store.
//!
//! ## Module Structure
//!
//! - [`connection`]: Connection locking and pragmas
//! - [`schema`]: DDL and idempotent initialization
//! - [`sql`]: Partial `UPDATE` builder
//! - [`metrics`]: Per-operation metrics recording
//! - `store`: [`SqliteStore`] itself; the entity modules hold the trait impls

mod connection;
mod department;
mod employee;
mod metrics;
mod schema;
mod sql;
mod store;
mod subscription;

pub use connection::{configure_connection, lock_connection};
pub use metrics::OperationTimer;
pub use schema::{SCHEMA_STATEMENTS, initialize_schema};
pub use sql::UpdateBuilder;
pub use store::SqliteStore;

use crate::Error;

/// Returns a closure mapping a `rusqlite` error to [`Error::OperationFailed`].
pub(crate) fn op_failed(operation: &'static str) -> impl Fn(rusqlite::Error) -> Error {
    move |e| Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}
