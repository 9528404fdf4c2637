//! Chunk assembly: splitting parsed segments and tagging every piece.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chunking::classify::classify;
use crate::chunking::splitter::TextSplitter;
use crate::parsing::ParsedSegment;
use crate::types::{ContentType, DocType};

/// One classified chunk, shaped exactly like a line of the output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub chunk_id: String,
    pub content: String,
    pub metadata: ChunkMetadata,
}

/// Provenance and classification tags attached to every chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub source: String,
    pub page_num: u32,
    pub doc_type: DocType,
    pub content_type: ContentType,
    pub category: String,
}

/// Splits one segment into chunks, giving each a fresh id, a content-type
/// tag, a category, and a copy of the segment's provenance.
pub fn chunk_segment(splitter: &TextSplitter, segment: &ParsedSegment) -> Vec<ChunkRecord> {
    splitter
        .split_text(&segment.text)
        .into_iter()
        .map(|content| {
            let content_type = ContentType::infer(&content);
            let category = classify(&content).to_string();
            ChunkRecord {
                chunk_id: Uuid::new_v4().to_string(),
                content,
                metadata: ChunkMetadata {
                    source: segment.source.clone(),
                    page_num: segment.page,
                    doc_type: segment.doc_type,
                    content_type,
                    category,
                },
            }
        })
        .collect()
}

/// Splits a batch of segments in order, flattening into one chunk sequence.
pub fn chunk_segments(splitter: &TextSplitter, segments: &[ParsedSegment]) -> Vec<ChunkRecord> {
    segments
        .iter()
        .flat_map(|segment| chunk_segment(splitter, segment))
        .collect()
}
