//! Data model for archived correspondence records.
//!
//! Records serialize camelCase so the persisted JSON stays compatible with
//! collections written by earlier releases of the archive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::{Attachment, AttachmentKind};
use crate::error::{Error, Result};

/// Direction of a piece of correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    /// Display label in the archive's working language ("incoming"/"outgoing").
    pub fn display_label(&self) -> &'static str {
        match self {
            Direction::Incoming => "وارد",
            Direction::Outgoing => "صادر",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Incoming => write!(f, "incoming"),
            Direction::Outgoing => write!(f, "outgoing"),
        }
    }
}

/// Pre-kind-tag attachment shape written by older releases. Only PDFs were
/// supported then, so the kind is implied. Normalized away on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyPdfFile {
    pub name: String,
    pub data: String,
}

/// One archived document entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRecord {
    /// Opaque unique id, assigned at creation, never changed.
    pub id: String,
    pub file_type: Direction,
    /// Timestamp of archival, assigned at creation, not user-editable.
    pub archive_date: DateTime<Utc>,
    pub archiver_name: String,
    pub issuing_entity: String,
    pub document_number: String,
    pub title: String,
    /// Free-form document date as entered by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_date: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_file: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_file: Option<LegacyPdfFile>,
    /// Text derived from the attachment at ingestion time. Cached, never
    /// recomputed automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
}

impl ArchiveRecord {
    /// Rewrite the legacy single-purpose attachment shape into the current
    /// tagged one, in memory. Called once on load so no read site has to
    /// branch on shape; the normalized form persists on the next save.
    pub fn normalize_legacy(&mut self) {
        if self.attached_file.is_none() {
            if let Some(legacy) = self.pdf_file.take() {
                self.attached_file = Some(Attachment {
                    name: legacy.name,
                    data: legacy.data,
                    kind: AttachmentKind::Pdf,
                });
            }
        } else {
            self.pdf_file = None;
        }
        if matches!(self.document_date.as_deref(), Some("")) {
            self.document_date = None;
        }
    }
}

/// User-supplied record fields, validated before any store mutation.
/// Excludes everything the controller assigns (`id`, `archiveDate`,
/// attachment, extracted text).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub file_type: Direction,
    pub archiver_name: String,
    pub issuing_entity: String,
    pub document_number: String,
    pub title: String,
    pub document_date: Option<String>,
    pub notes: String,
}

impl RecordDraft {
    /// Check the four required fields are non-empty (whitespace-only counts
    /// as empty). Lists every missing field in one error.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.archiver_name.trim().is_empty() {
            missing.push("archiver name");
        }
        if self.issuing_entity.trim().is_empty() {
            missing.push("issuing entity");
        }
        if self.document_number.trim().is_empty() {
            missing.push("document number");
        }
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "required fields missing: {}",
                missing.join(", ")
            )))
        }
    }

    /// Build a full record from this draft. The caller assigns identity and
    /// archival time.
    pub fn into_record(
        self,
        id: String,
        archive_date: DateTime<Utc>,
        attached_file: Option<Attachment>,
        extracted_text: Option<String>,
    ) -> ArchiveRecord {
        ArchiveRecord {
            id,
            file_type: self.file_type,
            archive_date,
            archiver_name: self.archiver_name,
            issuing_entity: self.issuing_entity,
            document_number: self.document_number,
            title: self.title,
            document_date: self.document_date.filter(|d| !d.trim().is_empty()),
            notes: self.notes,
            attached_file,
            pdf_file: None,
            extracted_text,
        }
    }
}

/// Replacement attachment produced by a re-upload during edit, together with
/// the text extracted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentReplacement {
    pub attachment: Attachment,
    pub extracted_text: Option<String>,
}

/// Partial update applied to an existing record. Everything except `id` and
/// `archiveDate` is replaceable; when `attachment` is `None` the existing
/// attachment and cached extracted text stay untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordUpdate {
    pub draft: RecordDraft,
    pub attachment: Option<AttachmentReplacement>,
}

impl RecordUpdate {
    /// Merge this update into `record` in place.
    pub fn apply_to(&self, record: &mut ArchiveRecord) {
        record.file_type = self.draft.file_type;
        record.archiver_name = self.draft.archiver_name.clone();
        record.issuing_entity = self.draft.issuing_entity.clone();
        record.document_number = self.draft.document_number.clone();
        record.title = self.draft.title.clone();
        record.document_date = self
            .draft
            .document_date
            .clone()
            .filter(|d| !d.trim().is_empty());
        record.notes = self.draft.notes.clone();
        if let Some(replacement) = &self.attachment {
            record.attached_file = Some(replacement.attachment.clone());
            record.extracted_text = replacement.extracted_text.clone();
            record.pdf_file = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecordDraft {
        RecordDraft {
            file_type: Direction::Incoming,
            archiver_name: "Huda".to_string(),
            issuing_entity: "Directorate of Agriculture".to_string(),
            document_number: "1441".to_string(),
            title: "Irrigation report".to_string(),
            document_date: Some("2026-03-01".to_string()),
            notes: String::new(),
        }
    }

    #[test]
    fn validate_accepts_complete_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn validate_rejects_each_missing_required_field() {
        for field in ["archiver_name", "issuing_entity", "document_number", "title"] {
            let mut d = draft();
            match field {
                "archiver_name" => d.archiver_name = "  ".to_string(),
                "issuing_entity" => d.issuing_entity = String::new(),
                "document_number" => d.document_number = String::new(),
                "title" => d.title = "\t".to_string(),
                _ => unreachable!(),
            }
            let err = d.validate().unwrap_err();
            assert!(
                matches!(err, Error::Validation(_)),
                "expected Validation error for empty {field}, got {err}"
            );
        }
    }

    #[test]
    fn validate_lists_all_missing_fields() {
        let mut d = draft();
        d.archiver_name = String::new();
        d.title = String::new();
        let msg = d.validate().unwrap_err().to_string();
        assert!(msg.contains("archiver name"));
        assert!(msg.contains("title"));
    }

    #[test]
    fn into_record_drops_empty_document_date() {
        let mut d = draft();
        d.document_date = Some("   ".to_string());
        let record = d.into_record("r1".to_string(), Utc::now(), None, None);
        assert_eq!(record.document_date, None);
    }

    #[test]
    fn normalize_legacy_promotes_pdf_file() {
        let mut record = draft().into_record("r1".to_string(), Utc::now(), None, None);
        record.pdf_file = Some(LegacyPdfFile {
            name: "old.pdf".to_string(),
            data: "JVBERg==".to_string(),
        });
        record.normalize_legacy();
        let attachment = record.attached_file.expect("legacy file promoted");
        assert_eq!(attachment.kind, AttachmentKind::Pdf);
        assert_eq!(attachment.name, "old.pdf");
        assert_eq!(record.pdf_file, None);
    }

    #[test]
    fn normalize_legacy_prefers_current_shape() {
        let attachment = Attachment {
            name: "new.pdf".to_string(),
            data: "JVBERg==".to_string(),
            kind: AttachmentKind::Pdf,
        };
        let mut record =
            draft().into_record("r1".to_string(), Utc::now(), Some(attachment.clone()), None);
        record.pdf_file = Some(LegacyPdfFile {
            name: "old.pdf".to_string(),
            data: "xxxx".to_string(),
        });
        record.normalize_legacy();
        assert_eq!(record.attached_file, Some(attachment));
        assert_eq!(record.pdf_file, None);
    }

    #[test]
    fn update_without_attachment_keeps_cached_text() {
        let attachment = Attachment {
            name: "scan.png".to_string(),
            data: "aGVsbG8=".to_string(),
            kind: AttachmentKind::Image,
        };
        let mut record = draft().into_record(
            "r1".to_string(),
            Utc::now(),
            Some(attachment.clone()),
            Some("scanned text".to_string()),
        );
        let update = RecordUpdate {
            draft: RecordDraft {
                title: "Amended title".to_string(),
                ..draft()
            },
            attachment: None,
        };
        update.apply_to(&mut record);
        assert_eq!(record.title, "Amended title");
        assert_eq!(record.attached_file, Some(attachment));
        assert_eq!(record.extracted_text, Some("scanned text".to_string()));
    }

    #[test]
    fn update_with_attachment_overwrites_cached_text() {
        let mut record = draft().into_record(
            "r1".to_string(),
            Utc::now(),
            None,
            Some("stale".to_string()),
        );
        let replacement = AttachmentReplacement {
            attachment: Attachment {
                name: "fresh.pdf".to_string(),
                data: "JVBERg==".to_string(),
                kind: AttachmentKind::Pdf,
            },
            extracted_text: None,
        };
        let update = RecordUpdate {
            draft: draft(),
            attachment: Some(replacement.clone()),
        };
        update.apply_to(&mut record);
        assert_eq!(record.attached_file, Some(replacement.attachment));
        assert_eq!(record.extracted_text, None);
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = draft().into_record(
            "r1".to_string(),
            "2026-03-10T08:30:00Z".parse().unwrap(),
            None,
            None,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fileType"], "incoming");
        assert_eq!(json["archiverName"], "Huda");
        assert_eq!(json["documentNumber"], "1441");
        assert!(json.get("pdfFile").is_none());
    }

    #[test]
    fn record_deserializes_legacy_shape() {
        let json = r#"{
            "id": "1700000000000",
            "fileType": "outgoing",
            "archiveDate": "2023-11-14T22:13:20.000Z",
            "archiverName": "Ali",
            "issuingEntity": "GIS Unit",
            "documentDate": "",
            "documentNumber": "77",
            "title": "Survey",
            "notes": "",
            "pdfFile": {"name": "survey.pdf", "data": "JVBERg=="}
        }"#;
        let mut record: ArchiveRecord = serde_json::from_str(json).unwrap();
        record.normalize_legacy();
        assert_eq!(record.id, "1700000000000");
        assert_eq!(record.file_type, Direction::Outgoing);
        assert_eq!(record.document_date, None);
        let attachment = record.attached_file.unwrap();
        assert_eq!(attachment.kind, AttachmentKind::Pdf);
        assert_eq!(attachment.name, "survey.pdf");
    }

    #[test]
    fn direction_display_labels() {
        assert_eq!(Direction::Incoming.display_label(), "وارد");
        assert_eq!(Direction::Outgoing.display_label(), "صادر");
        assert_eq!(Direction::Incoming.to_string(), "incoming");
    }
}
