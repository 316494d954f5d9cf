//! Subscription export service.

use crate::io::formats::{Format, create_export_sink};
use crate::io::traits::{ExportSink, ExportableSubscription};
use crate::models::{Subscription, SubscriptionStatus};
use crate::storage::SubscriptionBackend;
use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Options for subscription export.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// File format; detected from the output extension when `None`.
    pub format: Option<Format>,
    /// Only export rows with this status.
    pub status: Option<SubscriptionStatus>,
}

impl ExportOptions {
    /// Sets the format explicitly.
    #[must_use]
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Restricts the export to one status.
    #[must_use]
    pub const fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Resolves the format for `path`: explicit choice first, then extension.
    ///
    /// # Errors
    ///
    /// Returns an error if no format was given and the extension is unknown.
    pub fn resolve_format(&self, path: &Path) -> Result<Format> {
        self.format.map_or_else(|| Format::from_path(path), Ok)
    }
}

/// Result of an export operation.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Number of rows written.
    pub exported: usize,
    /// Format used for export.
    pub format: Format,
    /// Output path (if file export).
    pub output_path: Option<String>,
}

impl ExportResult {
    /// Creates a new export result.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self {
            exported: 0,
            format,
            output_path: None,
        }
    }

    /// Returns whether any rows were exported.
    #[must_use]
    pub const fn has_exports(&self) -> bool {
        self.exported > 0
    }
}

/// Service for exporting subscriptions to external formats.
pub struct ExportService {
    store: Arc<dyn SubscriptionBackend>,
}

impl ExportService {
    /// Creates a new export service.
    #[must_use]
    pub fn new(store: Arc<dyn SubscriptionBackend>) -> Self {
        Self { store }
    }

    /// Exports subscriptions to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the format cannot be determined, the file cannot
    /// be created, or writing fails.
    pub fn export_to_file(&self, path: &Path, options: &ExportOptions) -> Result<ExportResult> {
        let format = options.resolve_format(path)?;

        let file = std::fs::File::create(path).map_err(|e| Error::FileAccess {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;
        let writer = std::io::BufWriter::new(file);

        let mut result = self.export_to_writer(writer, format, options.status)?;
        result.output_path = Some(path.display().to_string());
        tracing::info!(
            path = %path.display(),
            format = %format,
            exported = result.exported,
            "Export finished"
        );
        Ok(result)
    }

    /// Exports subscriptions to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if querying or writing fails.
    pub fn export_to_writer<W: Write>(
        &self,
        writer: W,
        format: Format,
        status: Option<SubscriptionStatus>,
    ) -> Result<ExportResult> {
        let subscriptions = self.store.list_subscriptions(status)?;
        let mut sink = create_export_sink(writer, format)?;
        let mut result = ExportResult::new(format);
        result.exported = Self::export_subscriptions(&subscriptions, sink.as_mut())?;
        sink.finalize()?;
        Ok(result)
    }

    /// Writes already-loaded subscriptions to a sink and returns the count.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn export_subscriptions<'a, I>(subscriptions: I, sink: &mut dyn ExportSink) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Subscription>,
    {
        let mut exported = 0;
        for subscription in subscriptions {
            sink.write(&ExportableSubscription::from(subscription))?;
            exported += 1;
        }
        Ok(exported)
    }
}
