//! Output: one JSON object per line, appended in processing order.

pub mod jsonl;

pub use jsonl::JsonlWriter;
