//! Spreadsheet workbook export via `rust_xlsxwriter`.

use rust_xlsxwriter::{Format, Workbook};

use arshif_core::defaults::{EXPORT_COLUMN_WIDTHS, EXPORT_SHEET_NAME};
use arshif_core::{ArchiveRecord, Error, Result};

use crate::columns::{record_row, EXPORT_HEADERS};

fn export_error(e: rust_xlsxwriter::XlsxError) -> Error {
    Error::Export(format!("workbook generation failed: {e}"))
}

/// Render records as an XLSX workbook with a single right-to-left sheet.
/// Row and field content matches `to_csv` exactly; only the container
/// encoding differs.
pub fn to_xlsx(records: &[ArchiveRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME).map_err(export_error)?;
    worksheet.set_right_to_left(true);

    for (col, width) in EXPORT_COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(export_error)?;
    }

    let header_format = Format::new().set_bold();
    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(export_error)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in record_row(record).iter().enumerate() {
            worksheet
                .write_string(row, col as u16, value)
                .map_err(export_error)?;
        }
    }

    workbook.save_to_buffer().map_err(export_error)
}
