//! Streaming document downloads.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use url::Url;

use crate::types::PipelineError;

/// A source document that landed on disk.
#[derive(Debug, Clone)]
pub struct DownloadedDocument {
    pub url: Url,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Derives the local filename for a source URL.
///
/// The Microsoft FY25 Q2 slide deck hides its extension behind a CDN path
/// and gets a fixed name; every other URL keeps its last path segment
/// (query dropped), with `.pdf` appended when the segment ends in neither
/// `.pdf` nor `.pptx`.
pub fn derive_filename(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    if host.ends_with("microsoft.com") && url.path().contains("SlidesFY25Q2") {
        return "SlidesFY25Q2.pptx".to_string();
    }

    let mut name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string();
    if !name.ends_with(".pdf") && !name.ends_with(".pptx") {
        name.push_str(".pdf");
    }
    name
}

/// Downloads every URL in order into `dest_dir`, creating it if absent.
///
/// Failures (bad URL, non-200 answer, transport error) are logged and the
/// URL is skipped; the returned list holds only the documents that landed
/// on disk, in request order.
pub async fn fetch_documents(
    client: &Client,
    urls: &[String],
    dest_dir: &Path,
) -> Result<Vec<DownloadedDocument>, PipelineError> {
    fs::create_dir_all(dest_dir).await?;

    let mut downloaded = Vec::new();
    for raw in urls {
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(err) => {
                warn!(url = %raw, error = %err, "skipping unparseable url");
                continue;
            }
        };
        match fetch_one(client, &url, dest_dir).await {
            Ok(document) => {
                info!(
                    file = %document.path.display(),
                    bytes = document.bytes,
                    "downloaded"
                );
                downloaded.push(document);
            }
            Err(err) => warn!(url = %url, error = %err, "download failed, skipping"),
        }
    }
    Ok(downloaded)
}

/// Streams one URL to disk. Success means status 200 exactly; the body is
/// written piece by piece so large documents never sit in memory whole.
async fn fetch_one(
    client: &Client,
    url: &Url,
    dest_dir: &Path,
) -> Result<DownloadedDocument, PipelineError> {
    let response = client.get(url.clone()).send().await?;
    if response.status() != StatusCode::OK {
        return Err(PipelineError::DownloadFailed {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let path = dest_dir.join(derive_filename(url));
    let mut file = fs::File::create(&path).await?;
    let mut stream = response.bytes_stream();
    let mut bytes = 0u64;
    while let Some(piece) = stream.next().await {
        let piece = piece?;
        bytes += piece.len() as u64;
        file.write_all(&piece).await?;
    }
    file.flush().await?;

    Ok(DownloadedDocument {
        url: url.clone(),
        path,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn microsoft_slide_deck_gets_the_fixed_name() {
        let name = derive_filename(&url(
            "https://cdn-dynmedia-1.microsoft.com/is/content/microsoftcorp/SlidesFY25Q2",
        ));
        assert_eq!(name, "SlidesFY25Q2.pptx");
    }

    #[test]
    fn last_segment_is_kept_for_known_extensions() {
        let name = derive_filename(&url(
            "https://digitalassets.tesla.com/tesla-contents/image/upload/IR/TSLA-Q4-2024-Update.pdf",
        ));
        assert_eq!(name, "TSLA-Q4-2024-Update.pdf");

        let name = derive_filename(&url("https://example.com/decks/keynote.pptx"));
        assert_eq!(name, "keynote.pptx");
    }

    #[test]
    fn query_string_is_dropped() {
        let name = derive_filename(&url("https://example.com/files/10-K.pdf?dl=1&v=2"));
        assert_eq!(name, "10-K.pdf");
    }

    #[test]
    fn missing_extension_defaults_to_pdf() {
        let name = derive_filename(&url("https://example.com/filings/annual-2024"));
        assert_eq!(name, "annual-2024.pdf");
    }
}
