//! Department records.

use serde::{Deserialize, Serialize};

use super::update::{FieldUpdate, require_non_empty};
use crate::Result;

/// A department row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Auto-increment identifier.
    pub id: i64,
    /// Department name (unique).
    pub name: String,
    /// Employee designated as head, if any.
    ///
    /// The head is not required to belong to this department.
    pub head_of_department_id: Option<i64>,
}

/// A department joined with its head's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRow {
    /// The department itself.
    #[serde(flatten)]
    pub department: Department,
    /// Name of the head employee, when one is assigned and still exists.
    pub head_name: Option<String>,
}

/// Partial update for a department.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentUpdate {
    /// New name. Cannot be cleared.
    pub name: FieldUpdate<String>,
    /// New head reference.
    pub head_of_department_id: FieldUpdate<i64>,
}

impl DepartmentUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = FieldUpdate::Set(name.into());
        self
    }

    /// Sets the head of department.
    #[must_use]
    pub const fn with_head(mut self, employee_id: i64) -> Self {
        self.head_of_department_id = FieldUpdate::Set(employee_id);
        self
    }

    /// Removes the head of department.
    #[must_use]
    pub const fn clear_head(mut self) -> Self {
        self.head_of_department_id = FieldUpdate::Clear;
        self
    }

    /// Returns true if no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_keep() && self.head_of_department_id.is_keep()
    }

    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is cleared or blank.
    pub fn validate(&self) -> Result<()> {
        self.name.require_text("department name")
    }
}

/// Validates and trims a department name for insertion.
///
/// # Errors
///
/// Returns an error if the name is blank.
pub fn validate_department_name(name: &str) -> Result<&str> {
    require_non_empty("department name", name)
}
