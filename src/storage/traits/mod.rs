//! Storage backend traits.

mod department;
mod employee;
mod subscription;

pub use department::DepartmentBackend;
pub use employee::EmployeeBackend;
pub use subscription::SubscriptionBackend;

/// A backend that stores all three record kinds.
pub trait RecordStore: DepartmentBackend + EmployeeBackend + SubscriptionBackend {}

impl<T> RecordStore for T where T: DepartmentBackend + EmployeeBackend + SubscriptionBackend {}
