//! JSON Lines writer for chunk records.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::chunking::ChunkRecord;
use crate::types::PipelineError;

/// Append-only JSON Lines writer.
///
/// Opening the writer truncates any previous run's output. Every appended
/// line is a complete JSON document, so an interrupted run leaves a valid
/// prefix behind. Non-ASCII text passes through unescaped.
#[derive(Debug)]
pub struct JsonlWriter {
    file: File,
    path: PathBuf,
    lines: usize,
}

impl JsonlWriter {
    /// Opens the output file, truncating any previous contents and creating
    /// parent directories as needed.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let file = File::create(&path).await?;
        Ok(Self {
            file,
            path,
            lines: 0,
        })
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Serializes one chunk onto its own line.
    pub async fn append(&mut self, chunk: &ChunkRecord) -> Result<(), PipelineError> {
        let mut line = serde_json::to_string(chunk)?;
        line.push('\n');
        self.file.write_all(line.as_bytes()).await?;
        self.lines += 1;
        Ok(())
    }

    /// Flushes buffered bytes and returns the number of lines written.
    pub async fn finish(mut self) -> Result<usize, PipelineError> {
        self.file.flush().await?;
        Ok(self.lines)
    }
}
