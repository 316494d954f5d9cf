//! Subscription import service.
//!
//! Reads rows from a source, validates them, skips known addresses and stores
//! the rest. A bad row never stops the batch.

use crate::io::formats::{Format, create_import_source};
use crate::io::traits::ImportSource;
use crate::io::validation::{ImportValidator, ValidationSeverity};
use crate::storage::SubscriptionBackend;
use crate::{Error, Result};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

/// Options for subscription import.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// File format to import from when the extension does not say.
    pub format: Format,
    /// Skip rows whose email already exists as a subscription.
    pub skip_duplicates: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            format: Format::Csv,
            skip_duplicates: true,
        }
    }
}

impl ImportOptions {
    /// Creates import options with the given format.
    #[must_use]
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables duplicate skipping.
    #[must_use]
    pub const fn with_skip_duplicates(mut self, skip: bool) -> Self {
        self.skip_duplicates = skip;
        self
    }
}

/// Result of an import operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Number of rows stored.
    pub imported: usize,
    /// Number of rows rejected by validation or storage.
    pub failed: usize,
    /// Number of rows skipped because their email already existed.
    pub skipped_duplicates: usize,
    /// Total rows read.
    pub total_processed: usize,
    /// Validation warnings for rows that were still imported.
    pub warnings: Vec<String>,
    /// One message per failed row.
    pub errors: Vec<String>,
}

impl ImportResult {
    /// Creates an empty result.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            imported: 0,
            failed: 0,
            skipped_duplicates: 0,
            total_processed: 0,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Returns `(successful, failed)` row counts.
    #[must_use]
    pub const fn counts(&self) -> (usize, usize) {
        (self.imported, self.failed)
    }

    /// Returns whether any rows were imported.
    #[must_use]
    pub const fn has_imports(&self) -> bool {
        self.imported > 0
    }

    /// Returns whether any rows failed.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn record_failure(&mut self, record: usize, message: impl std::fmt::Display) {
        let message = format!("Record {record}: {message}");
        tracing::warn!("{message}");
        self.failed += 1;
        self.errors.push(message);
    }
}

/// Service for importing subscriptions from external files.
pub struct ImportService {
    store: Arc<dyn SubscriptionBackend>,
}

impl ImportService {
    /// Creates a new import service.
    #[must_use]
    pub fn new(store: Arc<dyn SubscriptionBackend>) -> Self {
        Self { store }
    }

    /// Imports subscriptions from a file.
    ///
    /// The format is taken from the file extension when recognized, else
    /// from `options.format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`] if the file cannot be opened, or an error
    /// if the format is not importable or the file cannot be parsed.
    pub fn import_from_file(&self, path: &Path, options: ImportOptions) -> Result<ImportResult> {
        let format = Format::from_path(path).unwrap_or(options.format);

        let file = std::fs::File::open(path).map_err(|e| Error::FileAccess {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;
        let reader = std::io::BufReader::new(file);

        let result = self.import_from_reader(reader, options.with_format(format))?;
        tracing::info!(
            path = %path.display(),
            imported = result.imported,
            failed = result.failed,
            skipped_duplicates = result.skipped_duplicates,
            "Import finished"
        );
        Ok(result)
    }

    /// Imports subscriptions from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is not importable or parsing fails.
    pub fn import_from_reader<R: BufRead>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut source = create_import_source(reader, options.format)?;
        self.import_from_source(source.as_mut(), &options)
    }

    /// Imports subscriptions from a source.
    ///
    /// # Errors
    ///
    /// Returns an error only if the source itself cannot be read. Rows that
    /// fail to decode, validate, or store are counted in the result.
    pub fn import_from_source(
        &self,
        source: &mut dyn ImportSource,
        options: &ImportOptions,
    ) -> Result<ImportResult> {
        let validator = ImportValidator::new();
        let mut result = ImportResult::new();

        loop {
            let imported = match source.next() {
                Ok(Some(imported)) => imported,
                Ok(None) => break,
                Err(Error::InvalidInput(reason)) => {
                    result.total_processed += 1;
                    result.record_failure(result.total_processed, reason);
                    continue;
                },
                Err(e) => return Err(e),
            };
            result.total_processed += 1;
            let record = result.total_processed;

            let validation = validator.validate(&imported);
            for issue in validation.issues_of(ValidationSeverity::Warning) {
                result
                    .warnings
                    .push(format!("Record {record}: {}: {}", issue.field, issue.message));
            }
            if !validation.is_valid {
                let reasons = validation
                    .issues_of(ValidationSeverity::Error)
                    .map(|i| format!("{}: {}", i.field, i.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                result.record_failure(record, reasons);
                continue;
            }

            let request = validator.to_new_subscription(imported);

            if options.skip_duplicates {
                match self.store.get_subscription_by_email(&request.email) {
                    Ok(Some(_)) => {
                        tracing::debug!(record, email = %request.email, "Skipping existing email");
                        result.skipped_duplicates += 1;
                        continue;
                    },
                    Ok(None) => {},
                    Err(e) => {
                        result.record_failure(record, e);
                        continue;
                    },
                }
            }

            match self.store.create_subscription(&request) {
                Ok(_) => result.imported += 1,
                Err(e) => result.record_failure(record, e),
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubscriptionStatus;
    use crate::storage::SqliteStore;
    use std::io::Cursor;

    fn service() -> (Arc<SqliteStore>, ImportService) {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let service = ImportService::new(store.clone());
        (store, service)
    }

    #[test]
    fn test_import_options_defaults() {
        let options = ImportOptions::default();
        assert_eq!(options.format, Format::Csv);
        assert!(options.skip_duplicates);
    }

    #[test]
    fn test_empty_email_counts_as_failed() {
        let (store, service) = service();
        let input = "email,status\n,active\nb@x.com,\n";

        let result = service
            .import_from_reader(Cursor::new(input), ImportOptions::default())
            .unwrap();

        assert_eq!(result.counts(), (1, 1));
        assert_eq!(result.total_processed, 2);
        assert!(result.errors[0].starts_with("Record 1:"));
        let stored = store.list_subscriptions(None).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, SubscriptionStatus::Active);
    }

    #[test]
    fn test_unknown_status_counts_as_failed() {
        let (_, service) = service();
        let input = "email,status\na@x.com,pending\nb@x.com,BOUNCED\n";

        let result = service
            .import_from_reader(Cursor::new(input), ImportOptions::default())
            .unwrap();
        assert_eq!(result.counts(), (1, 1));
        assert!(result.errors[0].contains("pending"));
    }

    #[test]
    fn test_duplicates_skipped_by_default() {
        let (store, service) = service();
        let input = "email\na@x.com\na@x.com\nb@x.com\n";

        let result = service
            .import_from_reader(Cursor::new(input), ImportOptions::default())
            .unwrap();

        assert_eq!(result.counts(), (2, 0));
        assert_eq!(result.skipped_duplicates, 1);
        assert_eq!(store.list_subscriptions(None).unwrap().len(), 2);
    }

    #[test]
    fn test_duplicates_inserted_when_allowed() {
        let (store, service) = service();
        let input = "email\na@x.com\na@x.com\n";

        let result = service
            .import_from_reader(
                Cursor::new(input),
                ImportOptions::default().with_skip_duplicates(false),
            )
            .unwrap();

        assert_eq!(result.counts(), (2, 0));
        assert_eq!(result.skipped_duplicates, 0);
        assert_eq!(store.list_subscriptions(None).unwrap().len(), 2);
    }

    #[test]
    fn test_undecodable_row_fails_alone() {
        let (store, service) = service();
        let input: &[u8] = b"email\na@x.com\nb@x.com\nbad\xff@x.com\nc@x.com\n";

        let result = service
            .import_from_reader(input, ImportOptions::default())
            .unwrap();

        assert_eq!(result.counts(), (3, 1));
        assert_eq!(result.total_processed, 4);
        assert!(result.errors[0].starts_with("Record 3:"));
        let emails: Vec<_> = store
            .list_subscriptions(None)
            .unwrap()
            .into_iter()
            .map(|s| s.email)
            .collect();
        assert!(emails.contains(&"c@x.com".to_string()));
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let (_, service) = service();
        let result =
            service.import_from_file(Path::new("/nonexistent/emails.csv"), ImportOptions::default());
        assert!(matches!(result, Err(Error::FileAccess { .. })));
    }

    #[test]
    fn test_suspicious_email_imported_with_warning() {
        let (_, service) = service();
        let result = service
            .import_from_reader(Cursor::new("email\nnobody\n"), ImportOptions::default())
            .unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.warnings.len(), 1);
    }
}
