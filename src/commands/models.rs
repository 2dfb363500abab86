use crate::fetch::{validate_source_url, FileSource, HttpSource, RawSource};
use crate::utils::config::DEFAULT_SOURCE_URL;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Where the raw table comes from
///
/// **Public** - shared by every command that loads data
#[derive(Debug, Clone)]
pub struct SourceArgs {
    /// Remote CSV URL
    pub url: String,

    /// Local CSV path; takes precedence over `url`
    pub input: Option<PathBuf>,
}

impl Default for SourceArgs {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            input: None,
        }
    }
}

impl SourceArgs {
    /// Check the source before any request is made
    pub fn validate(&self) -> Result<()> {
        match &self.input {
            Some(path) if path.as_os_str().is_empty() => {
                anyhow::bail!("input path cannot be empty")
            }
            Some(_) => Ok(()),
            None => validate_source_url(&self.url).map_err(anyhow::Error::msg),
        }
    }

    /// Build the source this configuration describes
    pub fn to_source(&self) -> Result<Box<dyn RawSource>> {
        match &self.input {
            Some(path) => Ok(Box::new(FileSource::new(path.clone()))),
            None => {
                let source = HttpSource::new(self.url.clone())
                    .context("Failed to create HTTP client")?;
                Ok(Box::new(source))
            }
        }
    }
}

/// Arguments for the load command
#[derive(Debug, Clone, Default)]
pub struct LoadArgs {
    pub source: SourceArgs,

    /// Write the full derived table here (optional)
    pub output_json: Option<PathBuf>,
}

/// Arguments for the filter command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub source: SourceArgs,

    /// Country to select; None = dashboard default
    pub country: Option<String>,

    /// Inclusive start date (YYYY-MM-DD); None = default range start
    pub start: Option<String>,

    /// Inclusive end date (YYYY-MM-DD); None = latest date
    pub end: Option<String>,

    /// Write the filtered export here (optional)
    pub output_json: Option<PathBuf>,

    /// Print key metrics instead of every row
    pub print_summary: bool,
}
