//! Import/Export I/O subsystem.
//!
//! Moves the email list between the store and CSV or XLSX files.
//!
//! # Architecture
//!
//! - **Format adapters** implement [`ImportSource`] and [`ExportSink`] traits
//! - **Validation layer** normalizes and validates imported rows
//! - **Services** orchestrate format parsing, validation, and storage
//!
//! # Supported Formats
//!
//! | Format | Import | Export | Notes |
//! |--------|--------|--------|-------|
//! | CSV | ✓ | ✓ | Header row `id,email,subscribed_at,status,source,notes` |
//! | XLSX | - | ✓ | Requires `xlsx-export` feature |
//!
//! # Examples
//!
//! ```rust,ignore
//! use staffmail::io::{ImportOptions, ImportService};
//! use std::path::Path;
//!
//! let service = ImportService::new(store.clone());
//! let result = service.import_from_file(Path::new("emails.csv"), ImportOptions::default())?;
//! println!("Imported {}, failed {}", result.imported, result.failed);
//! ```

pub mod formats;
pub mod services;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use formats::Format;
pub use services::export::{ExportOptions, ExportResult, ExportService};
pub use services::import::{ImportOptions, ImportResult, ImportService};
pub use traits::{
    EXPORT_COLUMNS, ExportSink, ExportableSubscription, ImportSource, ImportedSubscription,
};
pub use validation::{ImportValidator, ValidationIssue, ValidationResult, ValidationSeverity};
