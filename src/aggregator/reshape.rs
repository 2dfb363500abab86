//! Wide to long reshaping.
//!
//! Each (subdivision, date column) cell of the raw table becomes one
//! `LongRow`. Date labels are parsed once per column; a label that no known
//! format accepts marks its rows with `RowDate::Invalid` instead of
//! dropping them, so the caller can see how much data was lost.

use crate::parser::dates::parse_date_label;
use crate::parser::raw_table::RawTable;
use crate::utils::config::ID_COLUMN_COUNT;
use crate::utils::error::DateParseError;
use chrono::NaiveDate;
use log::{debug, warn};

/// Reporting date of a long row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDate {
    Parsed(NaiveDate),
    /// The header label could not be parsed with any known format
    Invalid { label: String },
}

impl RowDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            RowDate::Parsed(date) => Some(*date),
            RowDate::Invalid { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RowDate::Parsed(_))
    }
}

/// One subdivision's cumulative count on one date
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub country: String,
    pub region: Option<String>,
    pub date: RowDate,
    pub cumulative: u64,
}

/// Reshaper output: long rows plus the labels that failed to parse
#[derive(Debug, Clone, Default)]
pub struct Reshaped {
    pub rows: Vec<LongRow>,
    pub date_errors: Vec<DateParseError>,
}

impl Reshaped {
    /// Rows carrying the invalid date marker
    pub fn invalid_row_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.date.is_valid()).count()
    }

    pub fn valid_row_count(&self) -> usize {
        self.rows.len() - self.invalid_row_count()
    }
}

/// Reshape a wide raw table into long rows
///
/// **Public** - first pipeline stage
///
/// # Arguments
/// * `table` - Parsed raw table
///
/// # Returns
/// Exactly `rows × date columns` long rows, in raw row order then column order
pub fn reshape(table: &RawTable) -> Reshaped {
    let mut date_errors = Vec::new();

    let dates: Vec<RowDate> = table
        .date_labels
        .iter()
        .enumerate()
        .map(|(i, label)| match parse_date_label(label) {
            Some(date) => RowDate::Parsed(date),
            None => {
                let error = DateParseError {
                    column: ID_COLUMN_COUNT + i,
                    label: label.clone(),
                };
                warn!("{}", error);
                date_errors.push(error);
                RowDate::Invalid {
                    label: label.clone(),
                }
            }
        })
        .collect();

    let mut rows = Vec::with_capacity(table.row_count() * dates.len());

    for raw in &table.rows {
        for (date, &cumulative) in dates.iter().zip(&raw.counts) {
            rows.push(LongRow {
                country: raw.country.clone(),
                region: raw.region.clone(),
                date: date.clone(),
                cumulative,
            });
        }
    }

    debug!(
        "Reshaped {} raw rows x {} dates into {} long rows ({} unparsable labels)",
        table.row_count(),
        dates.len(),
        rows.len(),
        date_errors.len()
    );

    Reshaped { rows, date_errors }
}
