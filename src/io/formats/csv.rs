//! CSV format adapter for import/export.
//!
//! Import matches headers by name, so column order does not matter and
//! unknown columns are ignored. Export always writes the full header.

use crate::io::traits::{
    EXPORT_COLUMNS, ExportSink, ExportableSubscription, ImportSource, ImportedSubscription,
};
use crate::{Error, Result};
use std::io::{BufRead, Write};

/// Returns a closure mapping a `csv` error to [`Error::OperationFailed`].
fn csv_failed(operation: &'static str) -> impl Fn(csv::Error) -> Error {
    move |e| Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}

/// Importable columns.
#[derive(Debug, Clone, Copy)]
enum Column {
    Email,
    Status,
    Source,
    Notes,
}

/// Maps a record read failure. Decoding errors are confined to the record,
/// so they come back as [`Error::InvalidInput`]; the rest are fatal.
fn record_failed(e: csv::Error) -> Error {
    match e.kind() {
        csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::UnequalLengths { .. } => {
            Error::InvalidInput(format!("unreadable row: {e}"))
        },
        _ => csv_failed("read_csv")(e),
    }
}

impl Column {
    /// Recognizes a header cell, case-insensitively and with a few aliases.
    fn from_header(header: &str) -> Option<Self> {
        match header.trim().to_lowercase().as_str() {
            "email" | "e-mail" | "email_address" => Some(Self::Email),
            "status" => Some(Self::Status),
            "source" | "origin" => Some(Self::Source),
            "notes" | "note" => Some(Self::Notes),
            _ => None,
        }
    }
}

/// CSV import source.
///
/// The first row is the header. A header without an `email` column is
/// accepted; every row then fails validation on its own.
pub struct CsvImportSource<R: BufRead> {
    reader: csv::Reader<R>,
    /// Position of each [`Column`] in the file, indexed by discriminant.
    positions: [Option<usize>; 4],
    record: csv::StringRecord,
}

impl<R: BufRead> CsvImportSource<R> {
    /// Reads the header row and prepares the column lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the header row cannot be read.
    pub fn new(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_failed("read_csv_headers"))?;
        let mut positions = [None; 4];
        for (i, header) in headers.iter().enumerate() {
            if let Some(column) = Column::from_header(header) {
                positions[column as usize].get_or_insert(i);
            }
        }
        if positions[Column::Email as usize].is_none() {
            tracing::warn!("CSV header has no 'email' column; every row will fail");
        }

        Ok(Self {
            reader,
            positions,
            record: csv::StringRecord::new(),
        })
    }

    /// Value of `column` in the current record; blank cells read as `None`.
    fn cell(&self, column: Column) -> Option<String> {
        self.positions[column as usize]
            .and_then(|i| self.record.get(i))
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
    }
}

impl<R: BufRead> ImportSource for CsvImportSource<R> {
    fn next(&mut self) -> Result<Option<ImportedSubscription>> {
        if !self
            .reader
            .read_record(&mut self.record)
            .map_err(record_failed)?
        {
            return Ok(None);
        }

        Ok(Some(ImportedSubscription {
            email: self.cell(Column::Email).unwrap_or_default(),
            status: self.cell(Column::Status),
            source: self.cell(Column::Source),
            notes: self.cell(Column::Notes),
        }))
    }
}

/// CSV export sink.
///
/// The header is written on construction so an empty export still has one.
pub struct CsvExportSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvExportSink<W> {
    /// Wraps `writer` and writes the header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(writer: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(writer);
        writer
            .write_record(EXPORT_COLUMNS)
            .map_err(csv_failed("write_csv_header"))?;
        Ok(Self { writer })
    }
}

impl<W: Write> ExportSink for CsvExportSink<W> {
    fn write(&mut self, row: &ExportableSubscription) -> Result<()> {
        self.writer
            .write_record(row.cells())
            .map_err(csv_failed("write_csv"))
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.writer.flush().map_err(|e| Error::OperationFailed {
            operation: "flush_csv".to_string(),
            cause: e.to_string(),
        })
    }
}
