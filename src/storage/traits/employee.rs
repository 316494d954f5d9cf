//! Employee storage trait.

use crate::Result;
use crate::models::{Employee, EmployeeRow, EmployeeUpdate, NewEmployee, UpdateOutcome};

/// Trait for employee storage backends.
///
/// Listings are ordered by employee name and carry the department name.
pub trait EmployeeBackend: Send + Sync {
    /// Creates an employee and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Name or email is blank, or the hire date is malformed
    /// - The department does not exist
    /// - Storage cannot be accessed
    fn create_employee(&self, employee: &NewEmployee) -> Result<i64>;

    /// Gets an employee by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn get_employee(&self, id: i64) -> Result<Option<Employee>>;

    /// Gets an employee by id with the department name resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn get_employee_row(&self, id: i64) -> Result<Option<EmployeeRow>>;

    /// Lists all employees.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn list_employees(&self) -> Result<Vec<EmployeeRow>>;

    /// Lists the employees of one department.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn list_employees_by_department(&self, department_id: i64) -> Result<Vec<EmployeeRow>>;

    /// Lists the supervisors of one department.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn list_supervisors_by_department(&self, department_id: i64) -> Result<Vec<EmployeeRow>>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the statement is rejected.
    fn update_employee(&self, id: i64, update: &EmployeeUpdate) -> Result<UpdateOutcome>;

    /// Deletes an employee. Departments headed by it lose their head.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn delete_employee(&self, id: i64) -> Result<bool>;
}
