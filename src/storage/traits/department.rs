//! Department storage trait.

use crate::Result;
use crate::models::{Department, DepartmentRow, DepartmentUpdate, UpdateOutcome};

/// Trait for department storage backends.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DepartmentBackend: Send + Sync {
    /// Creates a department and returns its id.
    ///
    /// # Arguments
    ///
    /// * `name` - Department name (must be unique)
    /// * `head_of_department_id` - Optional employee designated as head
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is blank or already used
    /// - The head id does not reference an employee
    /// - Storage cannot be accessed
    fn create_department(&self, name: &str, head_of_department_id: Option<i64>) -> Result<i64>;

    /// Gets a department by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn get_department(&self, id: i64) -> Result<Option<Department>>;

    /// Gets a department by id with the head's name resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn get_department_row(&self, id: i64) -> Result<Option<DepartmentRow>>;

    /// Lists all departments ordered by name, with the head's name resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn list_departments(&self) -> Result<Vec<DepartmentRow>>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the statement is rejected.
    fn update_department(&self, id: i64, update: &DepartmentUpdate) -> Result<UpdateOutcome>;

    /// Deletes a department and, by cascade, its employees.
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted, `false` if the id was not found.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be accessed.
    fn delete_department(&self, id: i64) -> Result<bool>;
}
