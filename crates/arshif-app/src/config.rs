//! Runtime configuration, sourced from environment variables with sensible
//! defaults. `.env` files are honored when present.

use std::path::PathBuf;

use tracing::warn;

use arshif_core::defaults::{
    ENV_DATA_DIR, ENV_MAX_UPLOAD_SIZE, ENV_OCR_LANG, MAX_UPLOAD_SIZE_BYTES, OCR_LANGUAGE,
};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the persisted record collection.
    pub data_dir: PathBuf,
    /// Recognition language for image OCR.
    pub ocr_language: String,
    /// Upper bound on attachment upload size, in bytes.
    pub max_upload_size_bytes: usize,
}

impl AppConfig {
    /// Build configuration from the environment.
    ///
    /// - `ARSHIF_DATA_DIR` overrides the data directory; otherwise the
    ///   platform data dir (`~/.local/share/arshif` and equivalents), falling
    ///   back to `.arshif` in the working directory.
    /// - `ARSHIF_OCR_LANG` overrides the OCR language (default `ara`).
    /// - `ARSHIF_MAX_UPLOAD_SIZE_BYTES` overrides the upload cap; an
    ///   unparsable value is ignored with a warning.
    pub fn from_env() -> Self {
        let data_dir = std::env::var(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .map(|d| d.join("arshif"))
                    .unwrap_or_else(|| PathBuf::from(".arshif"))
            });

        let ocr_language =
            std::env::var(ENV_OCR_LANG).unwrap_or_else(|_| OCR_LANGUAGE.to_string());

        let max_upload_size_bytes = match std::env::var(ENV_MAX_UPLOAD_SIZE) {
            Ok(raw) => match raw.parse::<usize>() {
                Ok(size) => size,
                Err(_) => {
                    warn!(
                        value = %raw,
                        "invalid {ENV_MAX_UPLOAD_SIZE}, using default of {MAX_UPLOAD_SIZE_BYTES} bytes"
                    );
                    MAX_UPLOAD_SIZE_BYTES
                }
            },
            Err(_) => MAX_UPLOAD_SIZE_BYTES,
        };

        Self {
            data_dir,
            ocr_language,
            max_upload_size_bytes,
        }
    }
}
