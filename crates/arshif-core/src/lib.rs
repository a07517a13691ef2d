//! # arshif-core
//!
//! Core types, traits, and validation for the arshif correspondence archive.
//!
//! This crate provides the record model, the attachment ingestion boundary,
//! the filter engine, and the trait definitions the other arshif crates
//! implement.

pub mod attachment;
pub mod defaults;
pub mod error;
pub mod filter;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use attachment::{detect_kind, validate_upload, Attachment, AttachmentKind, IncomingFile};
pub use error::{Error, Result};
pub use filter::FilterSpec;
pub use models::{
    ArchiveRecord, AttachmentReplacement, Direction, LegacyPdfFile, RecordDraft, RecordUpdate,
};
pub use traits::{RecordStore, TextExtractor};
