//! Import and export command handlers.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use staffmail::config::ImportSettings;
use staffmail::io::{
    ExportOptions, ExportService, Format, ImportOptions, ImportResult, ImportService,
};
use staffmail::models::SubscriptionStatus;
use staffmail::{Result, SubscriptionBackend};

use super::output_error;

/// Maximum number of per-row messages echoed after an import.
const MAX_LISTED_MESSAGES: usize = 10;

/// Executes the export command.
pub fn cmd_export(
    store: Arc<dyn SubscriptionBackend>,
    output: &Path,
    format: Option<Format>,
    status: Option<SubscriptionStatus>,
    out: &mut dyn Write,
) -> Result<()> {
    let options = ExportOptions { format, status };
    let result = ExportService::new(store).export_to_file(output, &options)?;

    writeln!(
        out,
        "Exported {} subscription(s) to {} ({})",
        result.exported,
        output.display(),
        result.format
    )
    .map_err(output_error)
}

/// Executes the import command.
///
/// Duplicate skipping follows the `[import]` config section unless
/// `allow_duplicates` is set.
pub fn cmd_import(
    store: Arc<dyn SubscriptionBackend>,
    file: &Path,
    allow_duplicates: bool,
    settings: ImportSettings,
    out: &mut dyn Write,
) -> Result<()> {
    let options = ImportOptions::default()
        .with_skip_duplicates(settings.skip_duplicates && !allow_duplicates);
    let result = ImportService::new(store).import_from_file(file, options)?;

    write_summary(out, &result).map_err(output_error)
}

fn write_summary(out: &mut dyn Write, result: &ImportResult) -> std::io::Result<()> {
    writeln!(out, "Import completed:")?;
    writeln!(out, "  Imported:         {}", result.imported)?;
    writeln!(out, "  Failed:           {}", result.failed)?;
    writeln!(out, "  Skipped (dupe):   {}", result.skipped_duplicates)?;
    writeln!(out, "  Total processed:  {}", result.total_processed)?;
    write_messages(out, "Warnings", &result.warnings)?;
    if result.has_errors() {
        write_messages(out, "Errors", &result.errors)?;
        if !result.has_imports() {
            writeln!(out)?;
            writeln!(out, "Nothing was imported; check the rows listed above.")?;
        }
    }
    Ok(())
}

fn write_messages(out: &mut dyn Write, title: &str, messages: &[String]) -> std::io::Result<()> {
    if messages.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{title} ({}):", messages.len())?;
    for message in messages.iter().take(MAX_LISTED_MESSAGES) {
        writeln!(out, "  - {message}")?;
    }
    if messages.len() > MAX_LISTED_MESSAGES {
        writeln!(out, "  ... and {} more", messages.len() - MAX_LISTED_MESSAGES)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffmail::SqliteStore;
    use staffmail::models::NewSubscription;
    use tempfile::TempDir;

    #[test]
    fn test_export_then_import_skips_everything() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("emails.csv");
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        store
            .create_subscription(&NewSubscription::new("a@x.com"))
            .unwrap();

        let mut out: Vec<u8> = Vec::new();
        cmd_export(store.clone(), &csv, None, None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Exported 1 subscription(s)"));

        let mut out: Vec<u8> = Vec::new();
        cmd_import(store, &csv, false, ImportSettings::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Imported:         0"));
        assert!(text.contains("Skipped (dupe):   1"));
    }

    #[test]
    fn test_allow_duplicates_overrides_config() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("emails.csv");
        std::fs::write(&csv, "email,status\na@x.com,active\n").unwrap();

        let store = Arc::new(SqliteStore::in_memory().unwrap());
        store
            .create_subscription(&NewSubscription::new("a@x.com"))
            .unwrap();

        cmd_import(store.clone(), &csv, true, ImportSettings::default(), &mut Vec::<u8>::new())
            .unwrap();
        assert_eq!(store.list_subscriptions(None).unwrap().len(), 2);
    }

    #[test]
    fn test_error_messages_listed() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("emails.csv");
        std::fs::write(&csv, "email,status\n,active\nb@x.com,active\n").unwrap();

        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let mut out: Vec<u8> = Vec::new();
        cmd_import(store, &csv, false, ImportSettings::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Imported:         1"));
        assert!(text.contains("Errors (1):"));
        assert!(text.contains("Record 1:"));
    }

    #[test]
    fn test_all_rows_failed_is_called_out() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("emails.csv");
        std::fs::write(&csv, "email,status
,active
c@x.com,pending
").unwrap();

        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let mut out: Vec<u8> = Vec::new();
        cmd_import(store, &csv, false, ImportSettings::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Errors (2):"));
        assert!(text.contains("Nothing was imported"));
    }

    #[test]
    fn test_clean_import_has_no_error_block() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("emails.csv");
        std::fs::write(&csv, "email
a@x.com
").unwrap();

        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let mut out: Vec<u8> = Vec::new();
        cmd_import(store, &csv, false, ImportSettings::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Errors"));
        assert!(!text.contains("Nothing was imported"));
    }
}
