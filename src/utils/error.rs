//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while retrieving the raw table
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Structural problems with the raw table. Any of these aborts the load.
#[derive(Error, Debug)]
pub enum MalformedInputError {
    #[error("CSV decoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input has no header row")]
    MissingHeader,

    #[error("Column {position} must be {expected}, found {found:?}")]
    MissingIdColumn {
        position: usize,
        expected: &'static str,
        found: Option<String>,
    },

    #[error("Input has no date columns after the identification columns")]
    NoDateColumns,

    #[error("Line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: empty country name")]
    EmptyCountry { line: usize },

    #[error("Line {line}, column {column:?}: invalid count {value:?}")]
    InvalidCount {
        line: usize,
        column: String,
        value: String,
    },
}

/// A date label that no known format could parse.
///
/// Recovered locally: the affected rows are excluded and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Column {column}: unparsable date label {label:?}")]
pub struct DateParseError {
    /// Zero-based column index in the raw table
    pub column: usize,
    pub label: String,
}

/// Query or derivation issued before any data is available
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No derived series available; load data first")]
pub struct NotLoadedError;

/// A country reached derivation with no rows. Indicates a defect upstream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Country {country:?} has no rows to derive")]
pub struct EmptySeriesError {
    pub country: String,
}

/// Errors that can abort a load
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Malformed(#[from] MalformedInputError),

    #[error(transparent)]
    NotLoaded(#[from] NotLoadedError),

    #[error(transparent)]
    EmptySeries(#[from] EmptySeriesError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
