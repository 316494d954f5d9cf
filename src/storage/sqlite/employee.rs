//! [`EmployeeBackend`] for [`SqliteStore`].

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::sql::UpdateBuilder;
use super::{SqliteStore, op_failed};
use crate::Result;
use crate::models::{
    Employee, EmployeeRow, EmployeeUpdate, NewEmployee, UpdateOutcome, blank_to_none,
};
use crate::storage::traits::EmployeeBackend;

const ENTITY: &str = "employees";

const SELECT_ROWS: &str = "SELECT e.id, e.name, e.email, e.department_id, e.is_supervisor,
            e.is_head, e.position, e.hire_date, d.name
     FROM employees e
     LEFT JOIN departments d ON e.department_id = d.id";

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        department_id: row.get(3)?,
        is_supervisor: row.get(4)?,
        is_head: row.get(5)?,
        position: row.get(6)?,
        hire_date: row.get(7)?,
    })
}

fn employee_row_from_row(row: &Row<'_>) -> rusqlite::Result<EmployeeRow> {
    Ok(EmployeeRow {
        employee: employee_from_row(row)?,
        department_name: row.get(8)?,
    })
}

fn query_rows(
    conn: &Connection,
    operation: &'static str,
    filter: &str,
    department_id: Option<i64>,
) -> Result<Vec<EmployeeRow>> {
    let sql = format!("{SELECT_ROWS} {filter} ORDER BY e.name, e.id");
    let mut stmt = conn.prepare(&sql).map_err(op_failed(operation))?;
    let rows = match department_id {
        Some(id) => stmt.query_map(params![id], employee_row_from_row),
        None => stmt.query_map([], employee_row_from_row),
    }
    .map_err(op_failed(operation))?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(op_failed(operation))
}

impl EmployeeBackend for SqliteStore {
    fn create_employee(&self, employee: &NewEmployee) -> Result<i64> {
        employee.validate()?;
        self.with_conn(ENTITY, "create", |conn| {
            conn.execute(
                "INSERT INTO employees
                    (name, email, department_id, is_supervisor, is_head, position, hire_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    employee.name.trim(),
                    employee.email.trim(),
                    employee.department_id,
                    employee.is_supervisor,
                    employee.is_head,
                    blank_to_none(employee.position.as_deref()),
                    blank_to_none(employee.hire_date.as_deref()),
                ],
            )
            .map_err(op_failed("create_employee"))?;
            let id = conn.last_insert_rowid();
            tracing::debug!(id, department_id = employee.department_id, "Created employee");
            Ok(id)
        })
    }

    fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        self.with_conn(ENTITY, "get", |conn| {
            conn.query_row(
                "SELECT id, name, email, department_id, is_supervisor, is_head, position, hire_date
                 FROM employees WHERE id = ?1",
                params![id],
                employee_from_row,
            )
            .optional()
            .map_err(op_failed("get_employee"))
        })
    }

    fn get_employee_row(&self, id: i64) -> Result<Option<EmployeeRow>> {
        self.with_conn(ENTITY, "get_row", |conn| {
            conn.query_row(
                &format!("{SELECT_ROWS} WHERE e.id = ?1"),
                params![id],
                employee_row_from_row,
            )
            .optional()
            .map_err(op_failed("get_employee_row"))
        })
    }

    fn list_employees(&self) -> Result<Vec<EmployeeRow>> {
        self.with_conn(ENTITY, "list", |conn| {
            query_rows(conn, "list_employees", "", None)
        })
    }

    fn list_employees_by_department(&self, department_id: i64) -> Result<Vec<EmployeeRow>> {
        self.with_conn(ENTITY, "list_by_department", |conn| {
            query_rows(
                conn,
                "list_employees_by_department",
                "WHERE e.department_id = ?1",
                Some(department_id),
            )
        })
    }

    fn list_supervisors_by_department(&self, department_id: i64) -> Result<Vec<EmployeeRow>> {
        self.with_conn(ENTITY, "list_supervisors", |conn| {
            query_rows(
                conn,
                "list_supervisors_by_department",
                "WHERE e.department_id = ?1 AND e.is_supervisor = 1",
                Some(department_id),
            )
        })
    }

    fn update_employee(&self, id: i64, update: &EmployeeUpdate) -> Result<UpdateOutcome> {
        if update.is_empty() {
            return Ok(UpdateOutcome::NoChanges);
        }
        update.validate()?;
        let builder = UpdateBuilder::new(ENTITY)
            .text("name", update.name.clone().normalized())
            .text("email", update.email.clone().normalized())
            .integer("department_id", update.department_id.clone())
            .flag("is_supervisor", update.is_supervisor)
            .flag("is_head", update.is_head)
            .text("position", update.position.clone().normalized())
            .text("hire_date", update.hire_date.clone().normalized());
        self.apply_update(ENTITY, "update_employee", id, builder)
    }

    fn delete_employee(&self, id: i64) -> Result<bool> {
        self.delete_row(ENTITY, "delete_employee", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::models::{DepartmentUpdate, FieldUpdate};
    use crate::storage::DepartmentBackend;

    fn store_with_department(name: &str) -> (SqliteStore, i64) {
        let store = SqliteStore::in_memory().expect("Failed to create in-memory store");
        let dept = store.create_department(name, None).unwrap();
        (store, dept)
    }

    #[test]
    fn test_list_by_department_single_supervisor() {
        let (store, sales) = store_with_department("Sales");
        store
            .create_employee(&NewEmployee::new("Ann", "ann@x.com", sales).supervisor(true))
            .unwrap();

        let rows = store.list_employees_by_department(sales).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee.name, "Ann");
        assert!(rows[0].employee.is_supervisor);
        assert_eq!(rows[0].department_name.as_deref(), Some("Sales"));
    }

    #[test]
    fn test_get_row_resolves_department_name() {
        let (store, dept) = store_with_department("Sales");
        let id = store.create_employee(&NewEmployee::new("Ann", "a@x.com", dept)).unwrap();

        let row = store.get_employee_row(id).unwrap().unwrap();
        assert_eq!(row.employee.name, "Ann");
        assert_eq!(row.department_name.as_deref(), Some("Sales"));
        assert!(store.get_employee_row(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_create_stores_optional_fields() {
        let (store, dept) = store_with_department("Engineering");
        let id = store
            .create_employee(
                &NewEmployee::new(" Linus ", "linus@x.com", dept)
                    .head(true)
                    .with_position("Architect")
                    .with_hire_date("2021-03-15"),
            )
            .unwrap();

        let emp = store.get_employee(id).unwrap().unwrap();
        assert_eq!(emp.name, "Linus");
        assert!(emp.is_head);
        assert!(!emp.is_supervisor);
        assert_eq!(emp.position.as_deref(), Some("Architect"));
        assert_eq!(emp.hire_date.as_deref(), Some("2021-03-15"));
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let (store, dept) = store_with_department("Sales");
        assert!(matches!(
            store.create_employee(&NewEmployee::new("", "a@x.com", dept)),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            store.create_employee(&NewEmployee::new("Ann", "a@x.com", dept).with_hire_date("15/03/2021")),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_create_with_unknown_department_fails() {
        let (store, _) = store_with_department("Sales");
        let result = store.create_employee(&NewEmployee::new("Ann", "ann@x.com", 404));
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }

    #[test]
    fn test_list_supervisors_filters() {
        let (store, sales) = store_with_department("Sales");
        store
            .create_employee(&NewEmployee::new("Ann", "ann@x.com", sales).supervisor(true))
            .unwrap();
        store
            .create_employee(&NewEmployee::new("Bob", "bob@x.com", sales))
            .unwrap();

        let supervisors = store.list_supervisors_by_department(sales).unwrap();
        assert_eq!(supervisors.len(), 1);
        assert_eq!(supervisors[0].employee.name, "Ann");
        assert_eq!(store.list_employees_by_department(sales).unwrap().len(), 2);
    }

    #[test]
    fn test_list_employees_ordered_by_name() {
        let (store, sales) = store_with_department("Sales");
        let hr = store.create_department("HR", None).unwrap();
        store.create_employee(&NewEmployee::new("Zoe", "z@x.com", sales)).unwrap();
        store.create_employee(&NewEmployee::new("Ann", "a@x.com", hr)).unwrap();

        let rows = store.list_employees().unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.employee.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Zoe"]);
        assert_eq!(rows[0].department_name.as_deref(), Some("HR"));
    }

    #[test]
    fn test_update_email_only_keeps_other_fields() {
        let (store, dept) = store_with_department("Sales");
        let id = store
            .create_employee(&NewEmployee::new("Ann", "ann@x.com", dept).with_position("Lead"))
            .unwrap();

        let outcome = store
            .update_employee(id, &EmployeeUpdate::new().with_email("ann@new.com"))
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Applied);

        let emp = store.get_employee(id).unwrap().unwrap();
        assert_eq!(emp.email, "ann@new.com");
        assert_eq!(emp.name, "Ann");
        assert_eq!(emp.department_id, dept);
        assert_eq!(emp.position.as_deref(), Some("Lead"));
    }

    #[test]
    fn test_update_clear_and_keep() {
        let (store, dept) = store_with_department("Sales");
        let id = store
            .create_employee(
                &NewEmployee::new("Ann", "ann@x.com", dept)
                    .with_position("Lead")
                    .with_hire_date("2020-01-01"),
            )
            .unwrap();

        let update = EmployeeUpdate {
            position: FieldUpdate::Clear,
            is_supervisor: Some(true),
            ..EmployeeUpdate::new()
        };
        store.update_employee(id, &update).unwrap();

        let emp = store.get_employee(id).unwrap().unwrap();
        assert_eq!(emp.position, None);
        assert_eq!(emp.hire_date.as_deref(), Some("2020-01-01"));
        assert!(emp.is_supervisor);
    }

    #[test]
    fn test_update_no_changes_and_not_found() {
        let (store, dept) = store_with_department("Sales");
        let id = store.create_employee(&NewEmployee::new("Ann", "a@x.com", dept)).unwrap();

        assert_eq!(
            store.update_employee(id, &EmployeeUpdate::new()).unwrap(),
            UpdateOutcome::NoChanges
        );
        assert_eq!(
            store
                .update_employee(id + 100, &EmployeeUpdate::new().with_name("Ghost"))
                .unwrap(),
            UpdateOutcome::NotFound
        );
    }

    #[test]
    fn test_update_rejects_cleared_required_fields() {
        let (store, dept) = store_with_department("Sales");
        let id = store.create_employee(&NewEmployee::new("Ann", "a@x.com", dept)).unwrap();

        let clear_name = EmployeeUpdate {
            name: FieldUpdate::Clear,
            ..EmployeeUpdate::new()
        };
        assert!(matches!(
            store.update_employee(id, &clear_name),
            Err(Error::InvalidInput(_))
        ));

        let clear_department = EmployeeUpdate {
            department_id: FieldUpdate::Clear,
            ..EmployeeUpdate::new()
        };
        assert!(store.update_employee(id, &clear_department).is_err());
    }

    #[test]
    fn test_move_to_other_department() {
        let (store, sales) = store_with_department("Sales");
        let hr = store.create_department("HR", None).unwrap();
        let id = store.create_employee(&NewEmployee::new("Ann", "a@x.com", sales)).unwrap();

        store
            .update_employee(id, &EmployeeUpdate::new().with_department(hr))
            .unwrap();

        assert!(store.list_employees_by_department(sales).unwrap().is_empty());
        assert_eq!(store.list_employees_by_department(hr).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_head_clears_department_head() {
        let (store, dept) = store_with_department("Sales");
        let id = store
            .create_employee(&NewEmployee::new("Ann", "a@x.com", dept).head(true))
            .unwrap();
        store
            .update_department(dept, &DepartmentUpdate::new().with_head(id))
            .unwrap();

        assert!(store.delete_employee(id).unwrap());
        assert!(!store.delete_employee(id).unwrap());

        let department = store.get_department(dept).unwrap().unwrap();
        assert_eq!(department.head_of_department_id, None);
    }
}
