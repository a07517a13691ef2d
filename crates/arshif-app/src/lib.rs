//! # arshif-app
//!
//! The archive controller and its runtime configuration. The controller
//! owns the in-memory mirror of the record collection and mediates every
//! user action (create, edit, delete, filter, export) between the
//! presentation layer and the storage/extraction backends.

pub mod config;
pub mod controller;

pub use config::AppConfig;
pub use controller::{ArchiveController, ExtractionStatus, SubmitOutcome};
