//! Pipeline configuration.
//!
//! Everything a run needs is resolved once at startup: the fixed source
//! list, filesystem destinations, splitter geometry, and the parsing
//! service credentials. Values come from compiled defaults overridden by
//! the process environment; a `.env` file is honored when the binary loads
//! it before calling [`PipelineConfig::from_env`].

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::types::PipelineError;

/// Hosted endpoint of the parsing service.
pub const DEFAULT_BASE_URL: &str = "https://api.cloud.llamaindex.ai/";

/// Environment variable holding the parsing-service API key.
pub const API_KEY_VAR: &str = "LLAMA_CLOUD_API_KEY";

/// The fixed investor-relations document set this pipeline ships with.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://cdn-dynmedia-1.microsoft.com/is/content/microsoftcorp/SlidesFY25Q2",
    "https://digitalassets.tesla.com/tesla-contents/image/upload/IR/TSLA-Q4-2024-Update.pdf",
    "https://s2.q4cdn.com/470004039/files/doc_earnings/2025/q1/filing/10Q-Q1-2025-as-filed.pdf",
    "https://www.apple.com/newsroom/pdfs/fy2025-q1/FY25_Q1_Consolidated_Financial_Statements.pdf",
    "https://s2.q4cdn.com/470004039/files/doc_financials/2021/q4/_10-K-2021-(As-Filed).pdf",
];

/// Settings for the external parsing-service client.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub api_key: String,
    pub base_url: Url,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

/// Full configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub sources: Vec<String>,
    pub docs_dir: PathBuf,
    pub output_path: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub parser: ParserConfig,
}

impl PipelineConfig {
    /// Builds the default configuration, reading the secret and path
    /// overrides from the environment.
    ///
    /// Recognized variables:
    ///
    /// * `LLAMA_CLOUD_API_KEY` (required)
    /// * `LLAMA_CLOUD_BASE_URL` (defaults to the hosted service)
    /// * `FILINGSMITH_DOCS_DIR` (defaults to `documents`)
    /// * `FILINGSMITH_OUTPUT` (defaults to `output.jsonl`)
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] when the API key is missing or the
    /// base URL override does not parse.
    pub fn from_env() -> Result<Self, PipelineError> {
        let api_key = env::var(API_KEY_VAR)
            .map_err(|_| PipelineError::Config(format!("{API_KEY_VAR} is not set")))?;

        let base_url =
            env::var("LLAMA_CLOUD_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|err| PipelineError::Config(format!("invalid parser base url: {err}")))?;

        let docs_dir = env::var("FILINGSMITH_DOCS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("documents"));
        let output_path = env::var("FILINGSMITH_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("output.jsonl"));

        Ok(Self {
            sources: DEFAULT_SOURCES.iter().map(|url| (*url).to_string()).collect(),
            docs_dir,
            output_path,
            chunk_size: 1000,
            chunk_overlap: 200,
            parser: ParserConfig {
                api_key,
                base_url,
                poll_interval: Duration::from_secs(2),
                max_polls: 150,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sources_are_well_formed() {
        assert_eq!(DEFAULT_SOURCES.len(), 5);
        for raw in DEFAULT_SOURCES {
            let url = Url::parse(raw).unwrap();
            assert!(matches!(url.scheme(), "http" | "https"));
        }
    }

    #[test]
    fn default_base_url_parses() {
        Url::parse(DEFAULT_BASE_URL).unwrap();
    }
}
