//! Storage layer.
//!
//! The record store is defined by one trait per entity
//! ([`DepartmentBackend`], [`EmployeeBackend`], [`SubscriptionBackend`]) and
//! implemented by [`SqliteStore`], which owns the single connection to the
//! local data file for the lifetime of the process.

// Allow significant_drop_tightening - dropping the connection guard slightly early
// provides no meaningful benefit.
#![allow(clippy::significant_drop_tightening)]

pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteStore;
pub use traits::{DepartmentBackend, EmployeeBackend, RecordStore, SubscriptionBackend};
