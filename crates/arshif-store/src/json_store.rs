//! Record store backed by a single JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use arshif_core::defaults::STORAGE_FILE_NAME;
use arshif_core::{ArchiveRecord, Error, RecordStore, RecordUpdate, Result};

/// File-backed record store.
///
/// Writes are atomic: the collection is serialized to a sibling temp file
/// and renamed over the live one, so a crash mid-write never leaves a
/// half-written collection behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the collection under `data_dir/archive_records.json`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join(STORAGE_FILE_NAME),
        }
    }

    /// Store the collection at an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the persisted collection.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<ArchiveRecord>> {
        let raw = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::Storage(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        match serde_json::from_slice::<Vec<ArchiveRecord>>(&raw) {
            Ok(mut records) => {
                for record in &mut records {
                    record.normalize_legacy();
                }
                Ok(records)
            }
            Err(e) => {
                // Corrupt data is recovered to an empty collection; the next
                // save overwrites it.
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "persisted collection is unparsable, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, records: &[ArchiveRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::Storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .await
            .map_err(|e| Error::Storage(format!("failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Error::Storage(format!("failed to replace {}: {e}", self.path.display())))?;

        debug!(count = records.len(), path = %self.path.display(), "persisted collection");
        Ok(())
    }

    async fn add(&self, record: ArchiveRecord) -> Result<()> {
        let mut records = self.load().await?;
        records.insert(0, record);
        self.save_all(&records).await
    }

    async fn update(&self, id: &str, update: RecordUpdate) -> Result<()> {
        let mut records = self.load().await?;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                update.apply_to(record);
                self.save_all(&records).await
            }
            None => {
                // Matches the long-standing merge semantics: an unknown id is
                // ignored rather than reported. See DESIGN.md.
                warn!(%id, "update for unknown record id ignored");
                Ok(())
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.load().await?;
        records.retain(|r| r.id != id);
        self.save_all(&records).await
    }
}
