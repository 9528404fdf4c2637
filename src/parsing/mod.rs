//! Parser adapter seam.
//!
//! The structurally hard work of reading PDF and PPTX internals is
//! delegated to an external hosted service. This module owns the narrow
//! interface the pipeline needs (one operation: local file in, page-level
//! segments out) plus the production REST client in [`llama_cloud`].

pub mod llama_cloud;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{DocType, PipelineError};

pub use llama_cloud::LlamaParseClient;

/// One page or slide of parsed text.
///
/// `source` and `doc_type` belong to the pipeline: whatever the parsing
/// service reports there is overwritten before chunking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedSegment {
    pub text: String,
    pub page: u32,
    pub source: String,
    pub doc_type: DocType,
}

impl ParsedSegment {
    /// Creates a segment with placeholder provenance, to be stamped by the
    /// pipeline after parsing.
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page,
            source: String::new(),
            doc_type: DocType::Pdf,
        }
    }
}

/// Narrow seam over the external document-parsing service.
///
/// Implementations report every failure as an `Err`; deciding that a failed
/// document simply yields zero chunks is the orchestrator's call, not the
/// parser's.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    /// Parses one local file into page-level segments.
    async fn parse_file(&self, path: &Path) -> Result<Vec<ParsedSegment>, PipelineError>;
}
