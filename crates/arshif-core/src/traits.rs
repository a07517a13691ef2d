//! Core traits for the archive's pluggable backends.
//!
//! These define the interfaces concrete implementations must satisfy,
//! keeping the controller testable against scripted stand-ins.

use async_trait::async_trait;

use crate::attachment::AttachmentKind;
use crate::error::Result;
use crate::models::{ArchiveRecord, RecordUpdate};

/// Durable store for the record collection.
///
/// Every mutating operation is a read-modify-write over the entire
/// collection; there is no incremental persistence.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load all records, newest first.
    ///
    /// Missing or unparsable persisted data yields an empty collection
    /// (corruption is logged, never raised); genuine I/O failures are errors.
    async fn load(&self) -> Result<Vec<ArchiveRecord>>;

    /// Overwrite the persisted collection. Write failures (e.g. the medium
    /// is full) must surface to the caller.
    async fn save_all(&self, records: &[ArchiveRecord]) -> Result<()>;

    /// Prepend a record (newest-first ordering) and persist.
    async fn add(&self, record: ArchiveRecord) -> Result<()>;

    /// Merge an update into the record with the given id and persist.
    /// Silently no-ops when the id is not present.
    async fn update(&self, id: &str, update: RecordUpdate) -> Result<()>;

    /// Remove the record with the given id and persist. No-op when absent.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Best-effort text extraction from one attachment kind.
///
/// Implementations are called exactly once per ingestion event; there is no
/// retry policy.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// The attachment kind this extractor handles.
    fn kind(&self) -> AttachmentKind;

    /// Derive plain text from the file's bytes. May legitimately return an
    /// empty string (blank scan, image-only PDF).
    async fn extract(&self, data: &[u8], filename: &str) -> Result<String>;

    /// Whether the underlying decoder is usable in this environment.
    async fn health_check(&self) -> Result<bool>;

    /// Short diagnostic name.
    fn name(&self) -> &str;
}
