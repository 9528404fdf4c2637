//! Shared wire-level enums and the crate-wide error type.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the ingestion pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration was missing or invalid at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure (connect, TLS, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A download answered with something other than 200.
    #[error("download of {url} failed with status {status}")]
    DownloadFailed { url: String, status: u16 },

    /// The parsing service rejected a job or never finished it.
    #[error("parse service error: {0}")]
    ParseService(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Kind of source document, recorded in every chunk's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Pdf,
    Ppt,
}

impl DocType {
    /// Derives the document kind from a local file path: `.pptx` means a
    /// presentation, everything else is treated as PDF.
    pub fn from_path(path: &Path) -> Self {
        let is_pptx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pptx"));
        if is_pptx { Self::Ppt } else { Self::Pdf }
    }
}

/// Coarse shape of a chunk's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Table,
}

impl ContentType {
    /// Tags a chunk as tabular when it carries a markdown pipe.
    pub fn infer(text: &str) -> Self {
        if text.contains('|') {
            Self::Table
        } else {
            Self::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn doc_type_from_extension() {
        assert_eq!(DocType::from_path(&PathBuf::from("a/deck.pptx")), DocType::Ppt);
        assert_eq!(DocType::from_path(&PathBuf::from("a/DECK.PPTX")), DocType::Ppt);
        assert_eq!(DocType::from_path(&PathBuf::from("a/report.pdf")), DocType::Pdf);
        assert_eq!(DocType::from_path(&PathBuf::from("a/no_extension")), DocType::Pdf);
    }

    #[test]
    fn doc_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DocType::Ppt).unwrap(), r#""ppt""#);
        assert_eq!(serde_json::to_string(&DocType::Pdf).unwrap(), r#""pdf""#);
    }

    #[test]
    fn content_type_pipe_heuristic() {
        assert_eq!(ContentType::infer("| a | b |"), ContentType::Table);
        assert_eq!(ContentType::infer("plain prose"), ContentType::Text);
        assert_eq!(serde_json::to_string(&ContentType::Table).unwrap(), r#""table""#);
    }
}
