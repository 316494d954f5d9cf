//! Data models for departments, employees, and email subscriptions.
//!
//! Each entity has a stored record type, a creation type (where more than a
//! couple of fields are involved), and a partial-update type built on
//! [`FieldUpdate`].

mod department;
mod employee;
mod subscription;
mod update;

pub use department::{Department, DepartmentRow, DepartmentUpdate, validate_department_name};
pub use employee::{
    Employee, EmployeeRow, EmployeeUpdate, HIRE_DATE_FORMAT, NewEmployee, validate_hire_date,
};
pub use subscription::{NewSubscription, Subscription, SubscriptionStatus, SubscriptionUpdate};
pub use update::{FieldUpdate, UpdateOutcome, blank_to_none, require_non_empty};
