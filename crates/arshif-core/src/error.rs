//! Error types for the arshif archive.

use thiserror::Error;

/// Result type alias using arshif's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for archive operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required form field is missing or empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uploaded file is not one of the accepted attachment kinds
    #[error("Unsupported attachment: {0}")]
    UnsupportedAttachment(String),

    /// Text extraction from an attachment failed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The persistence medium rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Record or attachment not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Export artifact generation failed
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "Validation error: title is required");
    }

    #[test]
    fn test_error_display_unsupported_attachment() {
        let err = Error::UnsupportedAttachment("image/gif".to_string());
        assert_eq!(err.to_string(), "Unsupported attachment: image/gif");
    }

    #[test]
    fn test_error_display_extraction() {
        let err = Error::Extraction("broken xref table".to_string());
        assert_eq!(err.to_string(), "Extraction error: broken xref table");
    }

    #[test]
    fn test_error_display_storage() {
        let err = Error::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("record 42".to_string());
        assert_eq!(err.to_string(), "Not found: record 42");
    }

    #[test]
    fn test_error_display_export() {
        let err = Error::Export("workbook write failed".to_string());
        assert_eq!(err.to_string(), "Export error: workbook write failed");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("bad data dir".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad data dir");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(7)
        }
        assert_eq!(get_result().unwrap(), 7);
    }
}
