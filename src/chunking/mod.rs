//! Chunking and classification.
//!
//! Parsed segments go through three steps here:
//!
//! * [`splitter`] — fixed-size overlapping splits with boundary preference.
//! * [`classify`] — first-match-wins keyword categorization.
//! * [`chunk`] — assembly of tagged [`ChunkRecord`]s ready for output.

pub mod chunk;
pub mod classify;
pub mod splitter;

pub use chunk::{ChunkMetadata, ChunkRecord, chunk_segment, chunk_segments};
pub use classify::{CATEGORIES, UNKNOWN_CATEGORY, classify};
pub use splitter::TextSplitter;
