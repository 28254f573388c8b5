//! Retrieval of raw feed documents
//!
//! Feeds are read from local files or downloaded over HTTP. Directory and
//! glob inputs expand to the XML documents they contain. The transformer
//! never sees anything but the document text returned here.

use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DOCUMENT_EXTENSION};
use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Where a feed document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Url(String),
}

impl DocumentSource {
    /// Interpret a command-line input; `http(s)://` inputs are URLs
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// Label used in logs and error messages
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Expand command-line inputs into individual documents
///
/// Directories yield their `*.xml` files recursively in sorted order, glob
/// patterns yield their matches, anything else is passed through unchanged.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<DocumentSource>> {
    let mut sources = Vec::new();

    for input in inputs {
        match DocumentSource::parse(input) {
            DocumentSource::File(path) if path.is_dir() => {
                let files = discover_documents(&path);
                debug!("{} document(s) in {}", files.len(), path.display());
                sources.extend(files.into_iter().map(DocumentSource::File));
            }
            DocumentSource::File(_) if is_glob_pattern(input) => {
                let files = expand_glob(input)?;
                debug!("{} document(s) match {}", files.len(), input);
                sources.extend(files.into_iter().map(DocumentSource::File));
            }
            source => sources.push(source),
        }
    }

    Ok(sources)
}

/// XML documents under a directory, sorted for a stable processing order
pub fn discover_documents(directory: &Path) -> Vec<PathBuf> {
    let mut documents: Vec<PathBuf> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && has_document_extension(path))
        .collect();

    documents.sort();
    documents
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|e| Error::configuration(format!("Invalid input pattern '{}': {}", pattern, e)))?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Reads documents from disk or over HTTP
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl SourceFetcher {
    /// Create a fetcher with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Fetch the full text of a document
    pub async fn fetch(&self, source: &DocumentSource) -> Result<String> {
        match source {
            DocumentSource::File(path) => self.read_file(path).await,
            DocumentSource::Url(url) => self.download(url).await,
        }
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::fetch_failed(path.display().to_string(), e.to_string()))?;

        debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }

    async fn download(&self, url: &str) -> Result<String> {
        info!("Downloading {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::fetch_failed(url, format!("timed out after {}s", self.timeout.as_secs()))
            } else {
                Error::fetch_failed(url, e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch_failed(url, format!("HTTP status {}", status)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::fetch_failed(url, format!("failed to read body: {}", e)))?;

        debug!("Downloaded {} bytes from {}", text.len(), url);
        Ok(text)
    }
}

impl Default for SourceFetcher {
    fn default() -> Self {
        let timeout = Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS);
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}
