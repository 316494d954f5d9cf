//! Core traits for import/export operations.
//!
//! Defines the [`ImportSource`] and [`ExportSink`] traits that format adapters
//! implement to support different file formats.

use crate::Result;
use crate::models::Subscription;
use serde::{Deserialize, Serialize};

/// Column order of every export, and the header row of the CSV format.
pub const EXPORT_COLUMNS: [&str; 6] = ["id", "email", "subscribed_at", "status", "source", "notes"];

/// Intermediate representation for an imported subscription row.
///
/// Values are raw text as read from the file. Validation decides whether the
/// row can be stored.
///
/// # Field Mapping
///
/// | Field | Required | Default |
/// |-------|----------|---------|
/// | `email` | Yes | - |
/// | `status` | No | `active` |
/// | `source` | No | `None` |
/// | `notes` | No | `None` |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedSubscription {
    /// Subscriber address; empty when the column is missing.
    pub email: String,

    /// Status text, if the column was present and non-blank.
    #[serde(default)]
    pub status: Option<String>,

    /// Where the address came from.
    #[serde(default)]
    pub source: Option<String>,

    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ImportedSubscription {
    /// Creates an imported row with just an email.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Sets the status text.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Source of imported subscription rows.
///
/// Implementations read rows from a specific format and yield them one at a
/// time for processing.
pub trait ImportSource {
    /// Reads the next row from the source.
    ///
    /// Returns `Ok(None)` when the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) when a
    /// single row cannot be decoded. The source has already moved past that
    /// row and reading may continue. Any other error means the source itself
    /// is unreadable.
    fn next(&mut self) -> Result<Option<ImportedSubscription>>;
}

/// Subscription representation for export.
///
/// Every value is already rendered as text; absent optional fields are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportableSubscription {
    /// Row identifier.
    pub id: i64,
    /// Subscriber address.
    pub email: String,
    /// Creation time, `YYYY-MM-DD HH:MM:SS`.
    pub subscribed_at: String,
    /// Lowercase status.
    pub status: String,
    /// Where the address came from.
    pub source: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl ExportableSubscription {
    /// Returns the row as text cells in [`EXPORT_COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [String; 6] {
        [
            self.id.to_string(),
            self.email.clone(),
            self.subscribed_at.clone(),
            self.status.clone(),
            self.source.clone().unwrap_or_default(),
            self.notes.clone().unwrap_or_default(),
        ]
    }
}

impl From<Subscription> for ExportableSubscription {
    fn from(s: Subscription) -> Self {
        Self {
            id: s.id,
            email: s.email,
            subscribed_at: s.subscribed_at,
            status: s.status.as_str().to_string(),
            source: s.source,
            notes: s.notes,
        }
    }
}

impl From<&Subscription> for ExportableSubscription {
    fn from(s: &Subscription) -> Self {
        Self::from(s.clone())
    }
}

/// Sink for exported subscriptions.
///
/// # Lifecycle
///
/// 1. Create sink with output destination (the header is written here)
/// 2. Call `write()` for each row
/// 3. Call `finalize()` to complete the export
pub trait ExportSink {
    /// Writes a single row to the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or I/O fails.
    fn write(&mut self, row: &ExportableSubscription) -> Result<()>;

    /// Finalizes the export, flushing buffers.
    ///
    /// This method consumes the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if I/O fails.
    fn finalize(self: Box<Self>) -> Result<()>;
}
