//! The archive controller.
//!
//! Owns the in-memory mirror of the persisted collection and reloads it
//! wholesale after every mutation, so mirror and store never diverge.
//! Attachment ingestion is synchronous with record creation: a record is not
//! persisted until extraction has resolved, success or failure. Extraction
//! itself is best-effort and never blocks a save.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use arshif_core::{
    filter, validate_upload, ArchiveRecord, Attachment, AttachmentReplacement, Error, FilterSpec,
    IncomingFile, RecordDraft, RecordStore, RecordUpdate, Result,
};
use arshif_extract::ExtractorSet;

/// What happened to the attachment during a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// No file was supplied.
    NoAttachment,
    /// Text was extracted from the attachment.
    Extracted,
    /// Extraction succeeded but yielded no text (blank scan, image-only PDF).
    Empty,
    /// Extraction failed; the record was saved without text.
    Failed,
}

/// Result of a successful submit, for presentation.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub record: ArchiveRecord,
    pub extraction: ExtractionStatus,
}

/// Mediates user actions against the store, the extractors, and the filter
/// engine. Single-writer: at most one operation is in flight at a time.
pub struct ArchiveController {
    store: Arc<dyn RecordStore>,
    extractors: ExtractorSet,
    max_upload_size_bytes: usize,
    records: Vec<ArchiveRecord>,
}

impl ArchiveController {
    /// Create a controller and populate the mirror from the store.
    pub async fn new(
        store: Arc<dyn RecordStore>,
        extractors: ExtractorSet,
        max_upload_size_bytes: usize,
    ) -> Result<Self> {
        let records = store.load().await?;
        Ok(Self {
            store,
            extractors,
            max_upload_size_bytes,
            records,
        })
    }

    /// The current mirror: the full unfiltered collection, newest first.
    pub fn records(&self) -> &[ArchiveRecord] {
        &self.records
    }

    /// Reload the mirror from the store.
    pub async fn refresh(&mut self) -> Result<()> {
        self.records = self.store.load().await?;
        Ok(())
    }

    /// Screen an upload, encode it, and run best-effort extraction.
    ///
    /// Screening failures (unsupported kind, oversize) are hard errors with
    /// no state change. Extraction failures are absorbed: the attachment is
    /// kept and the cached text stays empty.
    async fn ingest(
        &self,
        file: &IncomingFile,
    ) -> Result<(Attachment, Option<String>, ExtractionStatus)> {
        let kind = validate_upload(&file.name, &file.bytes, self.max_upload_size_bytes)?;
        let attachment = Attachment::from_bytes(&file.name, &file.bytes, kind);

        let (text, status) = match self.extractors.extract(kind, &file.bytes, &file.name).await {
            Ok(text) if text.is_empty() => (Some(String::new()), ExtractionStatus::Empty),
            Ok(text) => (Some(text), ExtractionStatus::Extracted),
            Err(e) => {
                warn!(filename = %file.name, error = %e, "text extraction failed, saving record without text");
                (None, ExtractionStatus::Failed)
            }
        };

        Ok((attachment, text, status))
    }

    /// Create a new record from a validated draft, ingesting the optional
    /// attachment first. Assigns the id and archival timestamp.
    pub async fn submit_new(
        &mut self,
        draft: RecordDraft,
        file: Option<IncomingFile>,
    ) -> Result<SubmitOutcome> {
        draft.validate()?;

        let (attachment, extracted_text, extraction) = match &file {
            Some(file) => {
                let (attachment, text, status) = self.ingest(file).await?;
                (Some(attachment), text, status)
            }
            None => (None, None, ExtractionStatus::NoAttachment),
        };

        let record = draft.into_record(
            Uuid::now_v7().to_string(),
            chrono::Utc::now(),
            attachment,
            extracted_text,
        );

        self.store.add(record.clone()).await?;
        self.refresh().await?;
        info!(id = %record.id, title = %record.title, "record archived");

        Ok(SubmitOutcome { record, extraction })
    }

    /// Update an existing record. A new file replaces the attachment and its
    /// cached text; without one, both are retained unchanged.
    pub async fn submit_edit(
        &mut self,
        id: &str,
        draft: RecordDraft,
        file: Option<IncomingFile>,
    ) -> Result<SubmitOutcome> {
        draft.validate()?;

        let (replacement, extraction) = match &file {
            Some(file) => {
                let (attachment, text, status) = self.ingest(file).await?;
                (
                    Some(AttachmentReplacement {
                        attachment,
                        extracted_text: text,
                    }),
                    status,
                )
            }
            None => (None, ExtractionStatus::NoAttachment),
        };

        let update = RecordUpdate {
            draft,
            attachment: replacement,
        };
        self.store.update(id, update).await?;
        self.refresh().await?;

        // The store treats an unknown id as a no-op; surface it here so the
        // user sees the edit went nowhere.
        let record = self
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("record not found: {id}")))?;
        info!(id = %record.id, "record updated");

        Ok(SubmitOutcome { record, extraction })
    }

    /// Delete a record. Irreversible; confirmation is a presentation concern.
    pub async fn remove(&mut self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        self.refresh().await?;
        info!(%id, "record deleted");
        Ok(())
    }

    /// Apply a filter spec to the mirror. Pure, no mutation.
    pub fn view(&self, spec: &FilterSpec) -> Vec<&ArchiveRecord> {
        filter::apply(&self.records, spec)
    }

    /// Decode a record's attachment for download: file name plus raw bytes.
    pub fn attachment_bytes(&self, id: &str) -> Result<(String, Vec<u8>)> {
        let record = self
            .records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("record not found: {id}")))?;
        let attachment = record
            .attached_file
            .as_ref()
            .ok_or_else(|| Error::NotFound(format!("record {id} has no attachment")))?;
        Ok((attachment.name.clone(), attachment.decode_data()?))
    }
}
