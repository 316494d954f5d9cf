//! Aggregate counts and staffing-rule checks.

use crate::Result;
use crate::models::SubscriptionStatus;
use crate::storage::RecordStore;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

/// Per-department staffing summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentBreakdown {
    /// Department id.
    pub id: i64,
    /// Department name.
    pub name: String,
    /// Employees in the department.
    pub employees: usize,
    /// Employees flagged as supervisors.
    pub supervisors: usize,
    /// Whether a head of department is assigned.
    pub has_head: bool,
}

/// Snapshot of the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Number of departments.
    pub total_departments: usize,
    /// Number of employees.
    pub total_employees: usize,
    /// Number of email subscriptions.
    pub total_subscriptions: usize,
    /// Subscriptions with status `active`.
    pub active_subscriptions: usize,
    /// Breakdown per department, ordered by name.
    pub departments: Vec<DepartmentBreakdown>,
    /// Names of departments with no supervisor.
    pub without_supervisor: Vec<String>,
    /// Names of departments with no head assigned.
    pub without_head: Vec<String>,
}

impl Statistics {
    /// Returns `true` if every department has a supervisor and a head.
    #[must_use]
    pub fn is_fully_staffed(&self) -> bool {
        self.without_supervisor.is_empty() && self.without_head.is_empty()
    }
}

/// Computes [`Statistics`] from a record store.
pub struct StatisticsService {
    store: Arc<dyn RecordStore>,
}

impl StatisticsService {
    /// Creates a statistics service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Collects counts and staffing findings.
    ///
    /// # Errors
    ///
    /// Returns an error if any listing fails.
    #[instrument(skip(self))]
    pub fn collect(&self) -> Result<Statistics> {
        let departments = self.store.list_departments()?;
        let employees = self.store.list_employees()?;
        let subscriptions = self.store.list_subscriptions(None)?;

        // department id -> (employees, supervisors)
        let mut staff: HashMap<i64, (usize, usize)> = HashMap::new();
        for row in &employees {
            let entry = staff.entry(row.employee.department_id).or_default();
            entry.0 += 1;
            if row.employee.is_supervisor {
                entry.1 += 1;
            }
        }

        let mut stats = Statistics {
            total_departments: departments.len(),
            total_employees: employees.len(),
            total_subscriptions: subscriptions.len(),
            active_subscriptions: subscriptions
                .iter()
                .filter(|s| s.status == SubscriptionStatus::Active)
                .count(),
            ..Statistics::default()
        };

        for row in departments {
            let department = row.department;
            let (count, supervisors) = staff.get(&department.id).copied().unwrap_or_default();
            let has_head = department.head_of_department_id.is_some();

            if supervisors == 0 {
                stats.without_supervisor.push(department.name.clone());
            }
            if !has_head {
                stats.without_head.push(department.name.clone());
            }
            stats.departments.push(DepartmentBreakdown {
                id: department.id,
                name: department.name,
                employees: count,
                supervisors,
                has_head,
            });
        }

        tracing::debug!(
            departments = stats.total_departments,
            employees = stats.total_employees,
            subscriptions = stats.total_subscriptions,
            "Collected statistics"
        );
        Ok(stats)
    }
}
