//! Output writers for the derived series.
//!
//! This module handles writing filtered or full-table exports to disk as
//! JSON and reading them back for validation.

pub mod json;

// Re-export main functions
pub use json::{build_export, build_full_export, export_to_string, read_export, write_export};
