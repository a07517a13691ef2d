//! # arshif-store
//!
//! Persistence layer for the arshif archive.
//!
//! The whole record collection lives in one JSON document inside the data
//! directory. Every mutation deserializes the full collection, applies the
//! change, and serializes the whole thing back — simplicity over performance
//! is intentional for a single-user archive.

pub mod json_store;

pub use json_store::JsonFileStore;
