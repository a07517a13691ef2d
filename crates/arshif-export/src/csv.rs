//! Delimited-text export.
//!
//! The output is UTF-8 prefixed with a byte-order marker so spreadsheet
//! tools decode the Arabic text correctly. Every field is quoted, embedded
//! quotes are doubled, rows are joined with `\n`.

use arshif_core::ArchiveRecord;

use crate::columns::{record_row, EXPORT_HEADERS};

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn join_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render records as CSV text. The header row is always present, even for
/// an empty subset.
pub fn to_csv(records: &[ArchiveRecord]) -> String {
    let header: Vec<String> = EXPORT_HEADERS.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![join_row(&header)];
    for record in records {
        lines.push(join_row(&record_row(record)));
    }
    format!("\u{feff}{}", lines.join("\n"))
}
