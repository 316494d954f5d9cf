//! XLSX export adapter.
//!
//! Writes a single sheet named `Email Subscriptions` with a styled header.

use std::io::Write;

use rust_xlsxwriter::{Color, Format as CellFormat, Workbook, Worksheet, XlsxError};

use crate::io::traits::{EXPORT_COLUMNS, ExportSink, ExportableSubscription};
use crate::{Error, Result};

/// Name of the exported sheet.
pub const SHEET_NAME: &str = "Email Subscriptions";

/// Header fill colour.
const HEADER_FILL: u32 = 0x0036_6092;

fn xlsx_failed(operation: &'static str) -> impl Fn(XlsxError) -> Error {
    move |e| Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}

/// XLSX export sink.
///
/// Rows are buffered in the worksheet; the workbook is encoded and written to
/// the destination in [`ExportSink::finalize`].
pub struct XlsxExportSink<W: Write> {
    writer: W,
    worksheet: Worksheet,
    next_row: u32,
}

impl<W: Write> XlsxExportSink<W> {
    /// Creates the sink and writes the header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet cannot be set up.
    pub fn new(writer: W) -> Result<Self> {
        let mut worksheet = Worksheet::new();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(xlsx_failed("xlsx_set_sheet_name"))?;

        let header_format = CellFormat::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL));

        for (col, header) in (0u16..).zip(EXPORT_COLUMNS) {
            worksheet
                .write_string_with_format(0, col, header, &header_format)
                .map_err(xlsx_failed("xlsx_write_header"))?;
        }

        Ok(Self {
            writer,
            worksheet,
            next_row: 1,
        })
    }
}

impl<W: Write> ExportSink for XlsxExportSink<W> {
    #[allow(clippy::cast_precision_loss)]
    fn write(&mut self, row: &ExportableSubscription) -> Result<()> {
        let r = self.next_row;
        self.worksheet
            .write_number(r, 0, row.id as f64)
            .map_err(xlsx_failed("xlsx_write_row"))?;

        let text_cells = [
            Some(row.email.as_str()),
            Some(row.subscribed_at.as_str()),
            Some(row.status.as_str()),
            row.source.as_deref(),
            row.notes.as_deref(),
        ];
        for (col, value) in (1u16..).zip(text_cells) {
            if let Some(value) = value {
                self.worksheet
                    .write_string(r, col, value)
                    .map_err(xlsx_failed("xlsx_write_row"))?;
            }
        }

        self.next_row += 1;
        Ok(())
    }

    fn finalize(self: Box<Self>) -> Result<()> {
        let Self {
            mut writer,
            mut worksheet,
            ..
        } = *self;
        worksheet.autofit();

        let mut workbook = Workbook::new();
        workbook.push_worksheet(worksheet);
        let buffer = workbook
            .save_to_buffer()
            .map_err(xlsx_failed("xlsx_encode"))?;

        writer
            .write_all(&buffer)
            .and_then(|()| writer.flush())
            .map_err(|e| Error::OperationFailed {
                operation: "write_xlsx".to_string(),
                cause: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, email: &str) -> ExportableSubscription {
        ExportableSubscription {
            id,
            email: email.to_string(),
            subscribed_at: "2024-01-01 00:00:00".to_string(),
            status: "active".to_string(),
            source: Some("web".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_writes_zip_container() {
        let mut output = Vec::new();
        {
            let mut sink = XlsxExportSink::new(&mut output).unwrap();
            sink.write(&row(1, "a@x.com")).unwrap();
            sink.write(&row(2, "b@x.com")).unwrap();
            Box::new(sink).finalize().unwrap();
        }

        // XLSX files are zip archives
        assert!(output.starts_with(b"PK"));
    }

    #[test]
    fn test_header_only_workbook() {
        let mut output = Vec::new();
        let sink = XlsxExportSink::new(&mut output).unwrap();
        assert_eq!(sink.next_row, 1);
        Box::new(sink).finalize().unwrap();
        assert!(!output.is_empty());
    }
}
