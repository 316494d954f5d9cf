//! Employee records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::update::{FieldUpdate, blank_to_none, require_non_empty};
use crate::{Error, Result};

/// Date format accepted for `hire_date`.
pub const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// An employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Auto-increment identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Work email. Not unique.
    pub email: String,
    /// Owning department. Deleting it deletes this employee.
    pub department_id: i64,
    /// Supervisor flag; only used for reporting.
    pub is_supervisor: bool,
    /// Head-of-department flag.
    pub is_head: bool,
    /// Job title.
    pub position: Option<String>,
    /// Hire date as `YYYY-MM-DD`.
    pub hire_date: Option<String>,
}

/// An employee joined with its department's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRow {
    /// The employee itself.
    #[serde(flatten)]
    pub employee: Employee,
    /// Name of the owning department.
    pub department_name: Option<String>,
}

/// Fields for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// Full name (required).
    pub name: String,
    /// Work email (required).
    pub email: String,
    /// Owning department (required).
    pub department_id: i64,
    /// Supervisor flag.
    pub is_supervisor: bool,
    /// Head-of-department flag.
    pub is_head: bool,
    /// Job title.
    pub position: Option<String>,
    /// Hire date as `YYYY-MM-DD`.
    pub hire_date: Option<String>,
}

impl NewEmployee {
    /// Creates a new employee with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, department_id: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department_id,
            is_supervisor: false,
            is_head: false,
            position: None,
            hire_date: None,
        }
    }

    /// Sets the supervisor flag.
    #[must_use]
    pub const fn supervisor(mut self, is_supervisor: bool) -> Self {
        self.is_supervisor = is_supervisor;
        self
    }

    /// Sets the head-of-department flag.
    #[must_use]
    pub const fn head(mut self, is_head: bool) -> Self {
        self.is_head = is_head;
        self
    }

    /// Sets the position.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Sets the hire date.
    #[must_use]
    pub fn with_hire_date(mut self, hire_date: impl Into<String>) -> Self {
        self.hire_date = Some(hire_date.into());
        self
    }

    /// Checks required fields and the hire date format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] on the first failing field.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("employee name", &self.name)?;
        require_non_empty("employee email", &self.email)?;
        if let Some(date) = blank_to_none(self.hire_date.as_deref()) {
            validate_hire_date(&date)?;
        }
        Ok(())
    }
}

/// Partial update for an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    /// New name. Cannot be cleared.
    pub name: FieldUpdate<String>,
    /// New email. Cannot be cleared.
    pub email: FieldUpdate<String>,
    /// New department. Cannot be cleared.
    pub department_id: FieldUpdate<i64>,
    /// New supervisor flag.
    pub is_supervisor: Option<bool>,
    /// New head flag.
    pub is_head: Option<bool>,
    /// New position.
    pub position: FieldUpdate<String>,
    /// New hire date.
    pub hire_date: FieldUpdate<String>,
}

impl EmployeeUpdate {
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

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = FieldUpdate::Set(email.into());
        self
    }

    /// Moves the employee to another department.
    #[must_use]
    pub const fn with_department(mut self, department_id: i64) -> Self {
        self.department_id = FieldUpdate::Set(department_id);
        self
    }

    /// Sets the position.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = FieldUpdate::Set(position.into());
        self
    }

    /// Returns true if no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_keep()
            && self.email.is_keep()
            && self.department_id.is_keep()
            && self.is_supervisor.is_none()
            && self.is_head.is_none()
            && self.position.is_keep()
            && self.hire_date.is_keep()
    }

    /// Checks required fields and the hire date format. A blank hire date
    /// clears the column and is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] on the first failing field.
    pub fn validate(&self) -> Result<()> {
        self.name.require_text("employee name")?;
        self.email.require_text("employee email")?;
        if matches!(self.department_id, FieldUpdate::Clear) {
            return Err(Error::InvalidInput(
                "employee department cannot be cleared".to_string(),
            ));
        }
        if let FieldUpdate::Set(date) = self.hire_date.clone().normalized() {
            validate_hire_date(&date)?;
        }
        Ok(())
    }
}

/// Checks that `date` is a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if parsing fails.
pub fn validate_hire_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date.trim(), HIRE_DATE_FORMAT)
        .map(|_| ())
        .map_err(|e| Error::InvalidInput(format!("hire date '{date}' is not YYYY-MM-DD: {e}")))
}
