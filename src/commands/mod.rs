//! Command handlers module.
//!
//! - `department.rs`, `employee.rs`, `subscription.rs`: CRUD subcommands
//! - `io.rs`: CSV/XLSX export and CSV import
//! - `stats.rs`: aggregate statistics
//!
//! Handlers write their output to the given writer so they can be exercised
//! against an in-memory store.

mod department;
mod employee;
mod io;
mod stats;
mod subscription;

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use staffmail::models::UpdateOutcome;
use staffmail::{Error, Result};

pub use department::{DepartmentAction, cmd_department};
pub use employee::{EmployeeAction, cmd_employee};
pub use io::{cmd_export, cmd_import};
pub use stats::cmd_stats;
pub use subscription::{SubscriptionAction, cmd_subscription};

/// Output format for list and get commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Maps a failed write to stdout.
#[allow(clippy::needless_pass_by_value)]
fn output_error(e: std::io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    }
}

/// Writes `value` as pretty JSON followed by a newline.
fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::OperationFailed {
        operation: "serialize_output".to_string(),
        cause: e.to_string(),
    })?;
    writeln!(out, "{json}").map_err(output_error)
}

/// Error for an id that matched no row.
fn not_found(kind: &str, id: i64) -> Error {
    Error::InvalidInput(format!("{kind} {id} not found"))
}

/// Reports the outcome of an update command.
fn report_update(out: &mut dyn Write, kind: &str, id: i64, outcome: UpdateOutcome) -> Result<()> {
    match outcome {
        UpdateOutcome::Applied => writeln!(out, "Updated {kind} {id}").map_err(output_error),
        UpdateOutcome::NoChanges => writeln!(out, "Nothing to update").map_err(output_error),
        UpdateOutcome::NotFound => Err(not_found(kind, id)),
    }
}

/// Reports the outcome of a delete command.
fn report_delete(out: &mut dyn Write, kind: &str, id: i64, deleted: bool) -> Result<()> {
    if deleted {
        writeln!(out, "Deleted {kind} {id}").map_err(output_error)
    } else {
        Err(not_found(kind, id))
    }
}

/// Renders an optional cell.
fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_update_outcomes() {
        let mut out: Vec<u8> = Vec::new();
        report_update(&mut out, "department", 3, UpdateOutcome::Applied).unwrap();
        report_update(&mut out, "department", 3, UpdateOutcome::NoChanges).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Updated department 3\nNothing to update\n"
        );

        let err = report_update(&mut Vec::<u8>::new(), "employee", 9, UpdateOutcome::NotFound)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid input: employee 9 not found");
    }

    #[test]
    fn test_report_delete_missing() {
        let result = report_delete(&mut Vec::<u8>::new(), "subscription", 1, false);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
