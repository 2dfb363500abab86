//! Raw table parsing and schema definitions.
//!
//! This module handles:
//! - Parsing the wide CSV feed into a `RawTable`
//! - Validating the identification columns
//! - Tolerant parsing of date labels
//! - Defining the output schema

pub mod dates;
pub mod raw_table;
pub mod schema;

// Re-export main types
pub use dates::{parse_date_label, parse_iso_date};
pub use raw_table::{parse_raw_table, RawRow, RawTable};
pub use schema::{CountryDayRow, GrowthPoint, KeyMetrics, SeriesExport};
