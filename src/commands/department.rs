//! Department subcommands.

use std::io::Write;

use clap::Subcommand;
use staffmail::models::{DepartmentRow, DepartmentUpdate, FieldUpdate};
use staffmail::rendering::Table;
use staffmail::{DepartmentBackend, Result};

use super::{OutputFormat, cell, not_found, output_error, report_delete, report_update, write_json};

/// Department subcommands.
#[derive(Debug, Subcommand)]
pub enum DepartmentAction {
    /// List all departments with their heads.
    List {
        /// Output format.
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show one department.
    Get {
        /// Department id.
        id: i64,

        /// Output format.
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Create a department.
    Add {
        /// Department name (must be unique).
        name: String,

        /// Employee id of the head of department.
        #[arg(long)]
        head: Option<i64>,
    },

    /// Change a department.
    Update {
        /// Department id.
        id: i64,

        /// New name.
        #[arg(long)]
        name: Option<String>,

        /// New head of department.
        #[arg(long, conflicts_with = "clear_head")]
        head: Option<i64>,

        /// Remove the head of department.
        #[arg(long)]
        clear_head: bool,
    },

    /// Delete a department and all of its employees.
    Delete {
        /// Department id.
        id: i64,
    },
}

/// Executes a department subcommand.
pub fn cmd_department<S>(store: &S, action: DepartmentAction, out: &mut dyn Write) -> Result<()>
where
    S: DepartmentBackend + ?Sized,
{
    match action {
        DepartmentAction::List { format } => {
            let rows = store.list_departments()?;
            write_rows(out, &rows, format)
        },
        DepartmentAction::Get { id, format } => {
            let row = store
                .get_department_row(id)?
                .ok_or_else(|| not_found("department", id))?;
            match format {
                OutputFormat::Json => write_json(out, &row),
                OutputFormat::Table => write_rows(out, &[row], format),
            }
        },
        DepartmentAction::Add { name, head } => {
            let id = store.create_department(&name, head)?;
            writeln!(out, "Created department {id}").map_err(output_error)
        },
        DepartmentAction::Update {
            id,
            name,
            head,
            clear_head,
        } => {
            let update = DepartmentUpdate {
                name: FieldUpdate::from_option(name),
                head_of_department_id: FieldUpdate::from_parts(head, clear_head),
            };
            let outcome = store.update_department(id, &update)?;
            report_update(out, "department", id, outcome)
        },
        DepartmentAction::Delete { id } => {
            let deleted = store.delete_department(id)?;
            report_delete(out, "department", id, deleted)
        },
    }
}

fn write_rows(out: &mut dyn Write, rows: &[DepartmentRow], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, rows);
    }
    let mut table = Table::new(["ID", "NAME", "HEAD ID", "HEAD"]);
    for row in rows {
        table.push_row([
            row.department.id.to_string(),
            row.department.name.clone(),
            cell(row.department.head_of_department_id),
            cell(row.head_name.as_deref()),
        ]);
    }
    table.write_to(out).map_err(output_error)
}
