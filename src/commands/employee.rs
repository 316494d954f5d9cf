//! Employee subcommands.

use std::io::Write;

use clap::Subcommand;
use staffmail::models::{EmployeeRow, EmployeeUpdate, FieldUpdate, NewEmployee};
use staffmail::rendering::Table;
use staffmail::{EmployeeBackend, Result};

use super::{OutputFormat, cell, not_found, output_error, report_delete, report_update, write_json};

/// Employee subcommands.
#[derive(Debug, Subcommand)]
pub enum EmployeeAction {
    /// List employees.
    List {
        /// Only employees of this department.
        #[arg(long)]
        department: Option<i64>,

        /// Only supervisors (requires `--department`).
        #[arg(long, requires = "department")]
        supervisors: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show one employee.
    Get {
        /// Employee id.
        id: i64,

        /// Output format.
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Create an employee.
    Add {
        /// Full name.
        name: String,

        /// Email address.
        email: String,

        /// Department id.
        #[arg(long)]
        department: i64,

        /// Mark as supervisor.
        #[arg(long)]
        supervisor: bool,

        /// Mark as head.
        #[arg(long)]
        head: bool,

        /// Job title.
        #[arg(long)]
        position: Option<String>,

        /// Hire date (`YYYY-MM-DD`).
        #[arg(long)]
        hire_date: Option<String>,
    },

    /// Change an employee. Unspecified fields are left unchanged.
    Update {
        /// Employee id.
        id: i64,

        /// New name.
        #[arg(long)]
        name: Option<String>,

        /// New email.
        #[arg(long)]
        email: Option<String>,

        /// Move to another department.
        #[arg(long)]
        department: Option<i64>,

        /// Set the supervisor flag.
        #[arg(long)]
        supervisor: Option<bool>,

        /// Set the head flag.
        #[arg(long)]
        head: Option<bool>,

        /// New job title.
        #[arg(long, conflicts_with = "clear_position")]
        position: Option<String>,

        /// Remove the job title.
        #[arg(long)]
        clear_position: bool,

        /// New hire date (`YYYY-MM-DD`).
        #[arg(long, conflicts_with = "clear_hire_date")]
        hire_date: Option<String>,

        /// Remove the hire date.
        #[arg(long)]
        clear_hire_date: bool,
    },

    /// Delete an employee.
    Delete {
        /// Employee id.
        id: i64,
    },
}

/// Executes an employee subcommand.
pub fn cmd_employee<S>(store: &S, action: EmployeeAction, out: &mut dyn Write) -> Result<()>
where
    S: EmployeeBackend + ?Sized,
{
    match action {
        EmployeeAction::List {
            department,
            supervisors,
            format,
        } => {
            let rows = match (department, supervisors) {
                (Some(id), true) => store.list_supervisors_by_department(id)?,
                (Some(id), false) => store.list_employees_by_department(id)?,
                (None, _) => store.list_employees()?,
            };
            write_rows(out, &rows, format)
        },
        EmployeeAction::Get { id, format } => {
            let row = store
                .get_employee_row(id)?
                .ok_or_else(|| not_found("employee", id))?;
            match format {
                OutputFormat::Json => write_json(out, &row),
                OutputFormat::Table => write_rows(out, &[row], format),
            }
        },
        EmployeeAction::Add {
            name,
            email,
            department,
            supervisor,
            head,
            position,
            hire_date,
        } => {
            let employee = NewEmployee {
                position,
                hire_date,
                ..NewEmployee::new(name, email, department)
                    .supervisor(supervisor)
                    .head(head)
            };
            let id = store.create_employee(&employee)?;
            writeln!(out, "Created employee {id}").map_err(output_error)
        },
        EmployeeAction::Update {
            id,
            name,
            email,
            department,
            supervisor,
            head,
            position,
            clear_position,
            hire_date,
            clear_hire_date,
        } => {
            let update = EmployeeUpdate {
                name: FieldUpdate::from_option(name),
                email: FieldUpdate::from_option(email),
                department_id: FieldUpdate::from_option(department),
                is_supervisor: supervisor,
                is_head: head,
                position: FieldUpdate::from_parts(position, clear_position),
                hire_date: FieldUpdate::from_parts(hire_date, clear_hire_date),
            };
            let outcome = store.update_employee(id, &update)?;
            report_update(out, "employee", id, outcome)
        },
        EmployeeAction::Delete { id } => {
            let deleted = store.delete_employee(id)?;
            report_delete(out, "employee", id, deleted)
        },
    }
}

fn flag(value: bool) -> String {
    String::from(if value { "yes" } else { "" })
}

fn write_rows(out: &mut dyn Write, rows: &[EmployeeRow], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, rows);
    }
    let mut table = Table::new([
        "ID",
        "NAME",
        "EMAIL",
        "DEPARTMENT",
        "SUPERVISOR",
        "HEAD",
        "POSITION",
        "HIRED",
    ]);
    for row in rows {
        let e = &row.employee;
        table.push_row([
            e.id.to_string(),
            e.name.clone(),
            e.email.clone(),
            row.department_name
                .clone()
                .unwrap_or_else(|| e.department_id.to_string()),
            flag(e.is_supervisor),
            flag(e.is_head),
            cell(e.position.as_deref()),
            cell(e.hire_date.as_deref()),
        ]);
    }
    table.write_to(out).map_err(output_error)
}
