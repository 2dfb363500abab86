//! Sources that supply the raw CSV text.
//!
//! The pipeline never performs I/O itself; it asks a `RawSource` for the
//! table text. Transport failures are surfaced as `FetchError` and are not
//! retried here.

use crate::utils::config::DEFAULT_FETCH_TIMEOUT;
use crate::utils::error::FetchError;
use log::{debug, info};
use reqwest::blocking::Client;
use std::path::PathBuf;

/// Anything that can hand over the raw table as text
pub trait RawSource {
    /// Human readable origin, used in logs and reports
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<String, FetchError>;
}

/// Blocking HTTP GET of a published CSV
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a new HTTP source
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(DEFAULT_FETCH_TIMEOUT)
            .build()
            .map_err(FetchError::RequestFailed)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RawSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String, FetchError> {
        info!("Fetching raw table from: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(FetchError::RequestFailed)?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }

        let text = response.text().map_err(FetchError::RequestFailed)?;
        debug!("Fetched {} bytes", text.len());

        Ok(text)
    }
}

/// A CSV file on local disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RawSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, FetchError> {
        info!("Reading raw table from: {}", self.path.display());

        std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// Raw table text already in memory
pub struct TextSource {
    label: String,
    text: String,
}

impl TextSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl RawSource for TextSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn fetch(&self) -> Result<String, FetchError> {
        Ok(self.text.clone())
    }
}

/// Check that a source URL is usable before any request is made
pub fn validate_source_url(url: &str) -> Result<(), String> {
    if url.trim().is_empty() {
        return Err("source URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("source URL must start with http:// or https://".to_string());
    }

    Ok(())
}
