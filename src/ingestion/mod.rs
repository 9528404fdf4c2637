//! Ingestion: turning the fixed source list into local files.
//!
//! * [`fetch`] — streaming downloads with per-URL failure isolation and
//!   filename derivation for the known vendor patterns.

pub mod fetch;

pub use fetch::{DownloadedDocument, derive_filename, fetch_documents};
