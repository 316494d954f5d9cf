//! [`DepartmentBackend`] for [`SqliteStore`].

use rusqlite::{OptionalExtension, Row, params};

use super::sql::UpdateBuilder;
use super::{SqliteStore, op_failed};
use crate::models::{
    Department, DepartmentRow, DepartmentUpdate, FieldUpdate, UpdateOutcome,
    validate_department_name,
};
use crate::storage::traits::DepartmentBackend;
use crate::{Error, Result};

const ENTITY: &str = "departments";

const SELECT_ROWS: &str = "SELECT d.id, d.name, d.head_of_department_id, h.name
     FROM departments d
     LEFT JOIN employees h ON d.head_of_department_id = h.id";

const UNIQUE_VIOLATION: &str = "UNIQUE constraint failed";

fn duplicate_name(name: &str) -> Error {
    Error::InvalidInput(format!("department '{name}' already exists"))
}

fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
        head_of_department_id: row.get(2)?,
    })
}

fn department_row_from_row(row: &Row<'_>) -> rusqlite::Result<DepartmentRow> {
    Ok(DepartmentRow {
        department: department_from_row(row)?,
        head_name: row.get(3)?,
    })
}

impl DepartmentBackend for SqliteStore {
    fn create_department(&self, name: &str, head_of_department_id: Option<i64>) -> Result<i64> {
        let name = validate_department_name(name)?;
        self.with_conn(ENTITY, "create", |conn| {
            conn.execute(
                "INSERT INTO departments (name, head_of_department_id) VALUES (?1, ?2)",
                params![name, head_of_department_id],
            )
            .map_err(|e| {
                if e.to_string().contains(UNIQUE_VIOLATION) {
                    duplicate_name(name)
                } else {
                    op_failed("create_department")(e)
                }
            })?;
            let id = conn.last_insert_rowid();
            tracing::debug!(id, name, "Created department");
            Ok(id)
        })
    }

    fn get_department(&self, id: i64) -> Result<Option<Department>> {
        self.with_conn(ENTITY, "get", |conn| {
            conn.query_row(
                "SELECT id, name, head_of_department_id FROM departments WHERE id = ?1",
                params![id],
                department_from_row,
            )
            .optional()
            .map_err(op_failed("get_department"))
        })
    }

    fn get_department_row(&self, id: i64) -> Result<Option<DepartmentRow>> {
        self.with_conn(ENTITY, "get_row", |conn| {
            conn.query_row(
                &format!("{SELECT_ROWS} WHERE d.id = ?1"),
                params![id],
                department_row_from_row,
            )
            .optional()
            .map_err(op_failed("get_department_row"))
        })
    }

    fn list_departments(&self) -> Result<Vec<DepartmentRow>> {
        self.with_conn(ENTITY, "list", |conn| {
            let mut stmt = conn
                .prepare(&format!("{SELECT_ROWS} ORDER BY d.name"))
                .map_err(op_failed("prepare_list_departments"))?;

            let rows = stmt
                .query_map([], department_row_from_row)
                .map_err(op_failed("list_departments"))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(op_failed("list_departments"))
        })
    }

    fn update_department(&self, id: i64, update: &DepartmentUpdate) -> Result<UpdateOutcome> {
        if update.is_empty() {
            return Ok(UpdateOutcome::NoChanges);
        }
        update.validate()?;
        let name = update.name.clone().normalized();
        let new_name = match &name {
            FieldUpdate::Set(n) => n.clone(),
            _ => String::new(),
        };
        let builder = UpdateBuilder::new(ENTITY)
            .text("name", name)
            .integer("head_of_department_id", update.head_of_department_id.clone());

        self.apply_update(ENTITY, "update_department", id, builder)
            .map_err(|e| match e {
                Error::OperationFailed { ref cause, .. } if cause.contains(UNIQUE_VIOLATION) => {
                    duplicate_name(&new_name)
                },
                other => other,
            })
    }

    fn delete_department(&self, id: i64) -> Result<bool> {
        let deleted = self.delete_row(ENTITY, "delete_department", id)?;
        if deleted {
            tracing::debug!(id, "Deleted department and its employees");
        }
        Ok(deleted)
    }
}
