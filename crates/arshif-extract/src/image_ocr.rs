//! Image OCR via the external `tesseract` binary.
//!
//! Pipeline: image bytes → temp file → `tesseract <input> <output> -l <lang>`
//! → read `<output>.txt`. One invocation per ingestion event, guarded by a
//! per-command timeout.

use std::path::Path;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

use arshif_core::defaults::{EXTRACTION_CMD_TIMEOUT_SECS, OCR_LANGUAGE};
use arshif_core::{AttachmentKind, Error, Result, TextExtractor};

/// OCR adapter configured for the archive's working language.
pub struct ImageOcrExtractor {
    language: String,
}

impl ImageOcrExtractor {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// Recognition language passed to tesseract's `-l` flag.
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for ImageOcrExtractor {
    fn default() -> Self {
        Self::new(OCR_LANGUAGE)
    }
}

/// Run a command that writes its result to a file, enforcing a timeout.
async fn run_cmd_status(cmd: &mut Command, timeout_secs: u64) -> Result<()> {
    let output = tokio::time::timeout(std::time::Duration::from_secs(timeout_secs), cmd.output())
        .await
        .map_err(|_| {
            Error::Extraction(format!("external command timed out after {timeout_secs}s"))
        })?
        .map_err(|e| Error::Extraction(format!("failed to execute command: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Extraction(format!(
            "command failed (exit {}): {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

#[async_trait]
impl TextExtractor for ImageOcrExtractor {
    fn kind(&self) -> AttachmentKind {
        AttachmentKind::Image
    }

    async fn extract(&self, data: &[u8], filename: &str) -> Result<String> {
        if data.is_empty() {
            return Err(Error::Extraction(
                "cannot run OCR on empty image data".to_string(),
            ));
        }

        let work_dir = TempDir::new()
            .map_err(|e| Error::Extraction(format!("failed to create temp dir: {e}")))?;

        // Keep the original extension so tesseract picks the right loader
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png");
        let input_path = work_dir.path().join(format!("input.{extension}"));
        std::fs::write(&input_path, data)
            .map_err(|e| Error::Extraction(format!("failed to write temp image: {e}")))?;

        let output_base = work_dir.path().join("ocr");
        debug!(filename, language = %self.language, "running tesseract");

        run_cmd_status(
            Command::new("tesseract")
                .arg(&input_path)
                .arg(&output_base)
                .arg("-l")
                .arg(&self.language),
            EXTRACTION_CMD_TIMEOUT_SECS,
        )
        .await?;

        let output_path = output_base.with_extension("txt");
        let text = std::fs::read_to_string(&output_path)
            .map_err(|e| Error::Extraction(format!("failed to read OCR output: {e}")))?;

        Ok(text.trim().to_string())
    }

    async fn health_check(&self) -> Result<bool> {
        match Command::new("tesseract").arg("--version").output().await {
            Ok(output) => Ok(output.status.success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "image_ocr"
    }
}
