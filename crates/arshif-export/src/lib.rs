//! # arshif-export
//!
//! Export adapters for archive records: a spreadsheet workbook and a
//! BOM-prefixed delimited-text file.
//!
//! Both formats share one fixed ten-column projection (`columns`), so rows
//! and per-row field values are identical between them; only the container
//! encoding differs. Neither adapter mutates its input.

pub mod columns;
pub mod csv;
pub mod xlsx;

pub use columns::{record_row, EXPORT_HEADERS};
pub use csv::to_csv;
pub use xlsx::to_xlsx;
