//! Import/export integration tests.
//!
//! Moves the email list through real CSV and XLSX files on disk.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use staffmail::io::{ExportOptions, ExportService, Format, ImportOptions, ImportService};
use staffmail::{Error, NewSubscription, SqliteStore, SubscriptionBackend, SubscriptionStatus};
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn seeded_store() -> Arc<SqliteStore> {
    let store = Arc::new(SqliteStore::in_memory().expect("Failed to create store"));
    store
        .create_subscription(&NewSubscription::new("a@x.com").with_source("website"))
        .unwrap();
    store
        .create_subscription(
            &NewSubscription::new("b@x.com")
                .with_status(SubscriptionStatus::Unsubscribed)
                .with_notes("asked, \"no more\""),
        )
        .unwrap();
    store
        .create_subscription(&NewSubscription::new("c@x.com").with_status(SubscriptionStatus::Bounced))
        .unwrap();
    store
}

// ============================================================================
// CSV round trip
// ============================================================================

#[test]
fn test_export_then_reimport_adds_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("emails.csv");
    let store = seeded_store();

    let exported = ExportService::new(store.clone())
        .export_to_file(&path, &ExportOptions::default())
        .unwrap();
    assert_eq!(exported.exported, 3);
    assert_eq!(exported.format, Format::Csv);

    let result = ImportService::new(store.clone())
        .import_from_file(&path, ImportOptions::default())
        .unwrap();

    assert_eq!(result.counts(), (0, 0));
    assert_eq!(result.skipped_duplicates, 3);
    assert_eq!(result.total_processed, 3);
    assert_eq!(store.list_subscriptions(None).unwrap().len(), 3);
}

#[test]
fn test_reimport_into_empty_store_preserves_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("emails.csv");

    ExportService::new(seeded_store())
        .export_to_file(&path, &ExportOptions::default())
        .unwrap();

    let target = Arc::new(SqliteStore::in_memory().unwrap());
    let result = ImportService::new(target.clone())
        .import_from_file(&path, ImportOptions::default())
        .unwrap();
    assert_eq!(result.counts(), (3, 0));

    let b = target.get_subscription_by_email("b@x.com").unwrap().unwrap();
    assert_eq!(b.status, SubscriptionStatus::Unsubscribed);
    assert_eq!(b.notes.as_deref(), Some("asked, \"no more\""));
    assert!(b.source.is_none());
}

#[test]
fn test_empty_email_row_fails_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("emails.csv");
    std::fs::write(
        &path,
        "id,email,subscribed_at,status,source,notes\n\
         1,x@x.com,2024-01-01 00:00:00,active,,\n\
         2,,2024-01-01 00:00:00,active,,\n\
         3,y@x.com,2024-01-01 00:00:00,bounced,fair,\n",
    )
    .unwrap();

    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let result = ImportService::new(store.clone())
        .import_from_file(&path, ImportOptions::default())
        .unwrap();

    assert_eq!(result.counts(), (2, 1));
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Record 2:"));
    assert_eq!(
        store
            .list_subscriptions(Some(SubscriptionStatus::Bounced))
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_missing_import_file_aborts() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteStore::in_memory().unwrap());

    let result = ImportService::new(store)
        .import_from_file(&dir.path().join("absent.csv"), ImportOptions::default());
    assert!(matches!(result, Err(Error::FileAccess { .. })));
}

// ============================================================================
// Filtered and empty exports
// ============================================================================

#[test]
fn test_status_filtered_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("active.csv");

    let result = ExportService::new(seeded_store())
        .export_to_file(
            &path,
            &ExportOptions::default().with_status(SubscriptionStatus::Active),
        )
        .unwrap();
    assert_eq!(result.exported, 1);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "id,email,subscribed_at,status,source,notes");
    assert!(lines[1].contains("a@x.com"));
}

#[test]
fn test_export_with_no_rows_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    let store = Arc::new(SqliteStore::in_memory().unwrap());

    let result = ExportService::new(store)
        .export_to_file(&path, &ExportOptions::default())
        .unwrap();
    assert_eq!(result.exported, 0);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "id,email,subscribed_at,status,source,notes\n"
    );
}

#[cfg(feature = "xlsx-export")]
#[test]
fn test_xlsx_export_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("emails.xlsx");

    let result = ExportService::new(seeded_store())
        .export_to_file(&path, &ExportOptions::default())
        .unwrap();
    assert_eq!(result.format, Format::Xlsx);
    assert_eq!(result.exported, 3);

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
