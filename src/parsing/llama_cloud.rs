//! REST client for the hosted LlamaParse service.
//!
//! The wire protocol is a three-step exchange: a multipart upload creates a
//! parse job, the job is polled until it settles, and the JSON result is
//! read back page by page. Markdown content is preferred per page, falling
//! back to plain text when the service provides none.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::debug;
use url::Url;

use super::{DocumentParser, ParsedSegment};
use crate::config::ParserConfig;
use crate::types::PipelineError;

/// Client for the LlamaParse cloud API.
#[derive(Debug, Clone)]
pub struct LlamaParseClient {
    http: Client,
    base_url: Url,
    api_key: String,
    poll_interval: Duration,
    max_polls: u32,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    status: String,
}

#[derive(Debug, Deserialize)]
struct JobResult {
    #[serde(default)]
    pages: Vec<PageResult>,
}

#[derive(Debug, Deserialize)]
struct PageResult {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    md: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl LlamaParseClient {
    /// Builds a client from parser configuration.
    pub fn new(config: &ParserConfig) -> Result<Self, PipelineError> {
        let http = Client::builder()
            .user_agent(crate::USER_AGENT)
            .use_rustls_tls()
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            poll_interval: config.poll_interval,
            max_polls: config.max_polls,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, PipelineError> {
        self.base_url
            .join(path)
            .map_err(|err| PipelineError::ParseService(format!("bad endpoint {path}: {err}")))
    }

    async fn upload(&self, path: &Path) -> Result<String, PipelineError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let bytes = tokio::fs::read(path).await?;
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.clone()));

        let response = self
            .http
            .post(self.endpoint("api/v1/parsing/upload")?)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PipelineError::ParseService(format!(
                "upload of {file_name} rejected with status {}",
                response.status()
            )));
        }
        let upload: UploadResponse = response.json().await?;
        debug!(job_id = %upload.id, file = %file_name, "parse job created");
        Ok(upload.id)
    }

    async fn wait_for_completion(&self, job_id: &str) -> Result<(), PipelineError> {
        for _ in 0..self.max_polls {
            let response = self
                .http
                .get(self.endpoint(&format!("api/v1/parsing/job/{job_id}"))?)
                .bearer_auth(&self.api_key)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(PipelineError::ParseService(format!(
                    "status check for job {job_id} failed with {}",
                    response.status()
                )));
            }
            let job: JobStatus = response.json().await?;
            match job.status.as_str() {
                "SUCCESS" | "COMPLETED" => return Ok(()),
                "ERROR" | "CANCELED" => {
                    return Err(PipelineError::ParseService(format!(
                        "job {job_id} ended in state {}",
                        job.status
                    )));
                }
                _ => sleep(self.poll_interval).await,
            }
        }
        Err(PipelineError::ParseService(format!(
            "job {job_id} did not complete within {} polls",
            self.max_polls
        )))
    }

    async fn fetch_result(&self, job_id: &str) -> Result<Vec<ParsedSegment>, PipelineError> {
        let response = self
            .http
            .get(self.endpoint(&format!("api/v1/parsing/job/{job_id}/result/json"))?)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PipelineError::ParseService(format!(
                "result fetch for job {job_id} failed with {}",
                response.status()
            )));
        }
        let result: JobResult = response.json().await?;
        Ok(result
            .pages
            .into_iter()
            .map(|page| ParsedSegment::new(page.md.or(page.text).unwrap_or_default(), page.page))
            .collect())
    }
}

#[async_trait]
impl DocumentParser for LlamaParseClient {
    async fn parse_file(&self, path: &Path) -> Result<Vec<ParsedSegment>, PipelineError> {
        let job_id = self.upload(path).await?;
        self.wait_for_completion(&job_id).await?;
        self.fetch_result(&job_id).await
    }
}
