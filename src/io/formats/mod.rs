//! Format adapters for import/export.
//!
//! Each format implements [`ImportSource`] and/or [`ExportSink`] traits.

pub mod csv;
#[cfg(feature = "xlsx-export")]
pub mod xlsx;

use crate::{Error, Result};
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use super::traits::{ExportSink, ImportSource};

/// Supported file formats for import/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Comma-separated values with a header row.
    Csv,
    /// Excel workbook (export only).
    #[cfg(feature = "xlsx-export")]
    Xlsx,
}

impl Format {
    /// Returns all available formats for export.
    #[must_use]
    pub fn export_formats() -> Vec<Self> {
        #[allow(unused_mut)]
        let mut formats = vec![Self::Csv];
        #[cfg(feature = "xlsx-export")]
        formats.push(Self::Xlsx);
        formats
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            #[cfg(feature = "xlsx-export")]
            Self::Xlsx => "xlsx",
        }
    }

    /// Detects format from file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some(ext) => Self::from_str(ext)
                .map_err(|_| Error::InvalidInput(format!("Unsupported file extension: .{ext}"))),
            None => Err(Error::InvalidInput(
                "Cannot determine format: file has no extension".to_string(),
            )),
        }
    }

    /// Returns whether this format supports import.
    #[must_use]
    pub const fn supports_import(&self) -> bool {
        match self {
            Self::Csv => true,
            #[cfg(feature = "xlsx-export")]
            Self::Xlsx => false,
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            #[cfg(feature = "xlsx-export")]
            "xlsx" | "excel" => Ok(Self::Xlsx),
            _ => Err(Error::InvalidInput(format!("Unknown format: {s}"))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Creates an import source for the given format and reader.
///
/// # Errors
///
/// Returns an error if the format doesn't support import or the header row
/// cannot be read.
pub fn create_import_source<'a, R: BufRead + 'a>(
    reader: R,
    format: Format,
) -> Result<Box<dyn ImportSource + 'a>> {
    match format {
        Format::Csv => Ok(Box::new(csv::CsvImportSource::new(reader)?)),
        #[cfg(feature = "xlsx-export")]
        Format::Xlsx => Err(Error::InvalidInput(
            "Spreadsheet import is not supported; import a CSV file instead".to_string(),
        )),
    }
}

/// Creates an export sink for the given format and writer.
///
/// The header row is written before this returns.
///
/// # Errors
///
/// Returns an error if sink creation fails.
pub fn create_export_sink<'a, W: Write + 'a>(
    writer: W,
    format: Format,
) -> Result<Box<dyn ExportSink + 'a>> {
    match format {
        Format::Csv => Ok(Box::new(csv::CsvExportSink::new(writer)?)),
        #[cfg(feature = "xlsx-export")]
        Format::Xlsx => Ok(Box::new(xlsx::XlsxExportSink::new(writer)?)),
    }
}
