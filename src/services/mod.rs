//! Services built on top of the record store.

mod statistics;

pub use statistics::{DepartmentBreakdown, Statistics, StatisticsService};
