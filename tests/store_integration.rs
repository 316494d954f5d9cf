//! Record store integration tests.
//!
//! Exercises `SqliteStore` against a real data file:
//! - Persistence across reopen
//! - Referential actions between departments and employees
//! - Tri-state partial updates

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use staffmail::{
    DepartmentBackend, DepartmentUpdate, EmployeeBackend, EmployeeUpdate, FieldUpdate,
    NewEmployee, NewSubscription, SqliteStore, StatisticsService, SubscriptionBackend,
    SubscriptionStatus, UpdateOutcome,
};
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn open(dir: &TempDir) -> SqliteStore {
    SqliteStore::open(dir.path().join("data").join("staffmail.db"))
        .expect("Failed to open store")
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let (sales, ann) = {
        let store = open(&dir);
        let sales = store.create_department("Sales", None).unwrap();
        let ann = store
            .create_employee(&NewEmployee::new("Ann", "ann@x.com", sales).supervisor(true))
            .unwrap();
        store
            .create_subscription(&NewSubscription::new("news@x.com").with_source("website"))
            .unwrap();
        store.close().unwrap();
        (sales, ann)
    };

    let store = open(&dir);
    let department = store.get_department(sales).unwrap().unwrap();
    assert_eq!(department.name, "Sales");
    assert_eq!(department.head_of_department_id, None);

    let staff = store.list_employees_by_department(sales).unwrap();
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0].employee.id, ann);
    assert_eq!(staff[0].employee.name, "Ann");

    let subscription = store
        .get_subscription_by_email("news@x.com")
        .unwrap()
        .unwrap();
    assert_eq!(subscription.source.as_deref(), Some("website"));
    assert_eq!(subscription.status, SubscriptionStatus::Active);
}

#[test]
fn test_reopen_is_idempotent() {
    let dir = TempDir::new().unwrap();
    for _ in 0..3 {
        open(&dir).close().unwrap();
    }
    assert!(open(&dir).list_departments().unwrap().is_empty());
}

// ============================================================================
// Referential actions
// ============================================================================

#[test]
fn test_department_delete_cascades_but_keeps_others() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    let sales = store.create_department("Sales", None).unwrap();
    let ops = store.create_department("Ops", None).unwrap();
    store
        .create_employee(&NewEmployee::new("Ann", "ann@x.com", sales))
        .unwrap();
    store
        .create_employee(&NewEmployee::new("Bob", "bob@x.com", sales))
        .unwrap();
    let cid = store
        .create_employee(&NewEmployee::new("Cid", "cid@x.com", ops))
        .unwrap();

    assert!(store.delete_department(sales).unwrap());

    let remaining = store.list_employees().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].employee.id, cid);
    assert!(store.list_employees_by_department(sales).unwrap().is_empty());
}

#[test]
fn test_deleting_head_clears_reference() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    let sales = store.create_department("Sales", None).unwrap();
    let ann = store
        .create_employee(&NewEmployee::new("Ann", "ann@x.com", sales).head(true))
        .unwrap();
    assert_eq!(
        store
            .update_department(sales, &DepartmentUpdate::new().with_head(ann))
            .unwrap(),
        UpdateOutcome::Applied
    );

    assert!(store.delete_employee(ann).unwrap());
    let department = store.get_department(sales).unwrap().unwrap();
    assert_eq!(department.head_of_department_id, None);
}

// ============================================================================
// Partial updates
// ============================================================================

#[test]
fn test_email_only_update_keeps_other_fields() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    let sales = store.create_department("Sales", None).unwrap();
    let id = store
        .create_employee(
            &NewEmployee::new("Ann", "ann@x.com", sales)
                .with_position("Lead")
                .with_hire_date("2021-03-01"),
        )
        .unwrap();

    let outcome = store
        .update_employee(id, &EmployeeUpdate::new().with_email("ann@y.com"))
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Applied);

    let employee = store.get_employee(id).unwrap().unwrap();
    assert_eq!(employee.email, "ann@y.com");
    assert_eq!(employee.name, "Ann");
    assert_eq!(employee.department_id, sales);
    assert_eq!(employee.position.as_deref(), Some("Lead"));
    assert_eq!(employee.hire_date.as_deref(), Some("2021-03-01"));
}

#[test]
fn test_clear_keep_and_no_op() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    let sales = store.create_department("Sales", None).unwrap();
    let id = store
        .create_employee(
            &NewEmployee::new("Ann", "ann@x.com", sales)
                .with_position("Lead")
                .with_hire_date("2021-03-01"),
        )
        .unwrap();

    let update = EmployeeUpdate {
        position: FieldUpdate::Clear,
        ..EmployeeUpdate::default()
    };
    assert_eq!(store.update_employee(id, &update).unwrap(), UpdateOutcome::Applied);

    let employee = store.get_employee(id).unwrap().unwrap();
    assert!(employee.position.is_none());
    assert_eq!(employee.hire_date.as_deref(), Some("2021-03-01"));

    assert_eq!(
        store.update_employee(id, &EmployeeUpdate::new()).unwrap(),
        UpdateOutcome::NoChanges
    );
}

#[test]
fn test_statistics_over_file_store() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open(&dir));

    let sales = store.create_department("Sales", None).unwrap();
    store
        .create_employee(&NewEmployee::new("Ann", "ann@x.com", sales).supervisor(true))
        .unwrap();
    store
        .create_subscription(&NewSubscription::new("a@x.com"))
        .unwrap();

    let stats = StatisticsService::new(store).collect().unwrap();
    assert_eq!(stats.total_departments, 1);
    assert_eq!(stats.active_subscriptions, 1);
    assert!(stats.without_supervisor.is_empty());
    assert_eq!(stats.without_head, vec!["Sales".to_string()]);
}
