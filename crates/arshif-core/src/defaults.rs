//! Centralized default constants for the arshif archive.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// STORAGE
// =============================================================================

/// File name of the single persisted record collection inside the data dir.
pub const STORAGE_FILE_NAME: &str = "archive_records.json";

// =============================================================================
// ATTACHMENT INGESTION
// =============================================================================

/// Maximum attachment upload size in bytes (20 MB).
/// Configurable via `ARSHIF_MAX_UPLOAD_SIZE_BYTES`.
pub const MAX_UPLOAD_SIZE_BYTES: usize = 20 * 1024 * 1024;

/// MIME types accepted at the ingestion boundary. Everything else is
/// rejected before any record state is touched.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/webp",
];

// =============================================================================
// TEXT EXTRACTION
// =============================================================================

/// Default OCR language (the archive's working language is Arabic).
/// Configurable via `ARSHIF_OCR_LANG`.
pub const OCR_LANGUAGE: &str = "ara";

/// Per-command timeout for external extraction tools (seconds).
pub const EXTRACTION_CMD_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// EXPORT
// =============================================================================

/// Worksheet name used in spreadsheet exports ("records").
pub const EXPORT_SHEET_NAME: &str = "السجلات";

/// Column widths for the ten-column export projection, in character units.
pub const EXPORT_COLUMN_WIDTHS: [f64; 10] =
    [10.0, 15.0, 20.0, 25.0, 15.0, 15.0, 30.0, 40.0, 12.0, 25.0];

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "ARSHIF_DATA_DIR";

/// Environment variable overriding the OCR language.
pub const ENV_OCR_LANG: &str = "ARSHIF_OCR_LANG";

/// Environment variable overriding the maximum upload size.
pub const ENV_MAX_UPLOAD_SIZE: &str = "ARSHIF_MAX_UPLOAD_SIZE_BYTES";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_mime_types_cover_boundary_contract() {
        assert!(ACCEPTED_MIME_TYPES.contains(&"application/pdf"));
        assert!(ACCEPTED_MIME_TYPES.contains(&"image/jpeg"));
        assert!(ACCEPTED_MIME_TYPES.contains(&"image/png"));
        assert!(ACCEPTED_MIME_TYPES.contains(&"image/webp"));
        assert_eq!(ACCEPTED_MIME_TYPES.len(), 4);
    }

    #[test]
    fn export_widths_match_column_count() {
        assert_eq!(EXPORT_COLUMN_WIDTHS.len(), 10);
    }
}
