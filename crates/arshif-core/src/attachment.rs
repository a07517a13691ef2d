//! Attachment payloads and the ingestion boundary.
//!
//! Exactly four content kinds are admitted: PDF, JPEG, PNG, WEBP. Detection
//! goes by magic bytes, not by the uploaded file's extension or any claimed
//! MIME type, so a renamed executable never reaches record state.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::defaults::ACCEPTED_MIME_TYPES;
use crate::error::{Error, Result};

/// Content kind of an attachment, decided once at the ingestion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Pdf,
    Image,
}

impl AttachmentKind {
    /// Display label used in exports ("PDF" / "image").
    pub fn display_label(&self) -> &'static str {
        match self {
            AttachmentKind::Pdf => "PDF",
            AttachmentKind::Image => "صورة",
        }
    }
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentKind::Pdf => write!(f, "pdf"),
            AttachmentKind::Image => write!(f, "image"),
        }
    }
}

/// A file stored inline with its record: name plus base64 payload plus kind
/// tag. The kind tag serializes as `type` for compatibility with existing
/// collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub data: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
}

impl Attachment {
    /// Encode raw bytes into a stored attachment.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8], kind: AttachmentKind) -> Self {
        Self {
            name: name.into(),
            data: BASE64.encode(bytes),
            kind,
        }
    }

    /// Decode the stored payload back to raw bytes.
    ///
    /// Collections written by earlier releases stored a full data URL
    /// (`data:<mime>;base64,<payload>`); the prefix is stripped here.
    pub fn decode_data(&self) -> Result<Vec<u8>> {
        let payload = if self.data.starts_with("data:") {
            match self.data.split_once("base64,") {
                Some((_, rest)) => rest,
                None => {
                    return Err(Error::Serialization(format!(
                        "attachment '{}' has a data URL without a base64 payload",
                        self.name
                    )))
                }
            }
        } else {
            self.data.as_str()
        };
        BASE64.decode(payload.trim()).map_err(|e| {
            Error::Serialization(format!("attachment '{}' payload is not valid base64: {e}", self.name))
        })
    }
}

/// A file handed to the controller by the presentation layer, before any
/// screening.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Detect the attachment kind from magic bytes.
///
/// The accepted set is `defaults::ACCEPTED_MIME_TYPES`; anything outside it
/// is rejected with no state change.
pub fn detect_kind(data: &[u8]) -> Result<AttachmentKind> {
    match infer::get(data) {
        Some(kind) => {
            let mime = kind.mime_type();
            if !ACCEPTED_MIME_TYPES.contains(&mime) {
                return Err(Error::UnsupportedAttachment(format!(
                    "{mime} is not an accepted kind (PDF, JPG, PNG, WEBP)"
                )));
            }
            if mime == "application/pdf" {
                Ok(AttachmentKind::Pdf)
            } else {
                Ok(AttachmentKind::Image)
            }
        }
        None => Err(Error::UnsupportedAttachment(
            "unrecognized file content (accepted: PDF, JPG, PNG, WEBP)".to_string(),
        )),
    }
}

/// Screen an upload at the ingestion boundary: non-empty, within the size
/// cap, and of an accepted kind. Returns the detected kind.
pub fn validate_upload(name: &str, data: &[u8], max_size_bytes: usize) -> Result<AttachmentKind> {
    if data.is_empty() {
        return Err(Error::UnsupportedAttachment(format!(
            "uploaded file '{name}' is empty"
        )));
    }
    if data.len() > max_size_bytes {
        return Err(Error::UnsupportedAttachment(format!(
            "uploaded file '{name}' exceeds the maximum size of {max_size_bytes} bytes"
        )));
    }
    detect_kind(data)
}
