//! Import and export service implementations.
//!
//! Orchestrates format parsing, validation, and storage operations.

pub mod export;
pub mod import;

pub use export::{ExportOptions, ExportResult, ExportService};
pub use import::{ImportOptions, ImportResult, ImportService};
