//! ```text
//! source URLs ──► ingestion::fetch_documents ──► local PDF/PPTX files
//!                                                       │
//!                          parsing::DocumentParser (LlamaParse REST)
//!                                                       │
//! page segments ──► chunking::TextSplitter + classify ──► ChunkRecords
//!                                                       │
//!                           output::JsonlWriter ──► output.jsonl
//! ```
//!
//! A strictly sequential batch pipeline over a fixed list of
//! investor-relations documents. One document at a time is downloaded,
//! parsed by the external service, split into overlapping chunks, tagged
//! with a keyword-derived category, and appended to the JSON Lines output.

pub mod chunking;
pub mod config;
pub mod ingestion;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod types;

pub use pipeline::{Pipeline, PipelineReport};
pub use types::PipelineError;

pub(crate) const USER_AGENT: &str = concat!("filingsmith/", env!("CARGO_PKG_VERSION"));
