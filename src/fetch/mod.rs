//! Retrieval of the raw wide table.

pub mod client;

pub use client::{validate_source_url, FileSource, HttpSource, RawSource, TextSource};
