//! Wide-format raw table parsing.
//!
//! Reads the comma-separated feed into a `RawTable`: one `RawRow` per
//! subdivision, with one count per date column. Structural problems
//! (missing identification columns, no date columns, ragged rows, bad
//! count cells) are reported as `MalformedInputError` and abort the load.

use crate::utils::config::{
    COUNTRY_COLUMN_NAMES, ID_COLUMN_COUNT, LATITUDE_COLUMN_NAMES, LONGITUDE_COLUMN_NAMES,
    REGION_COLUMN_NAMES,
};
use crate::utils::error::MalformedInputError;
use csv::StringRecord;
use log::{debug, warn};

/// One subdivision's record from the wide table
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line number in the source text
    pub line: usize,

    /// Province/state; None when the cell is empty
    pub region: Option<String>,

    pub country: String,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    /// Cumulative counts, aligned with `RawTable::date_labels`
    pub counts: Vec<u64>,
}

/// The loaded wide-format input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header labels of the date columns, in file order
    pub date_labels: Vec<String>,

    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Number of date columns
    pub fn date_count(&self) -> usize {
        self.date_labels.len()
    }

    /// Number of subdivision rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse CSV text into a raw table
///
/// **Public** - main entry point for reading the feed
///
/// # Arguments
/// * `text` - Comma-separated text with one header row
///
/// # Returns
/// Parsed table with every row validated against the header
///
/// # Errors
/// * `MalformedInputError::MissingIdColumn` - one of the four leading columns is missing
/// * `MalformedInputError::NoDateColumns` - nothing follows the identification columns
/// * `MalformedInputError::RaggedRow` - a row has a different field count than the header
/// * `MalformedInputError::InvalidCount` - a count cell is negative or non-numeric
pub fn parse_raw_table(text: &str) -> Result<RawTable, MalformedInputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let date_labels = validate_headers(&headers)?;
    let expected = headers.len();

    debug!(
        "Header validated: {} identification columns, {} date columns",
        ID_COLUMN_COUNT,
        date_labels.len()
    );

    let mut rows = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // records() starts after the header, lines are 1-based
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        if record.len() != expected {
            return Err(MalformedInputError::RaggedRow {
                line,
                expected,
                found: record.len(),
            });
        }

        rows.push(parse_row(line, &record, &date_labels)?);
    }

    debug!("Parsed {} raw rows", rows.len());

    Ok(RawTable { date_labels, rows })
}

/// Check the four identification columns and return the date labels
///
/// **Private** - header validation
fn validate_headers(headers: &StringRecord) -> Result<Vec<String>, MalformedInputError> {
    if headers.is_empty() {
        return Err(MalformedInputError::MissingHeader);
    }

    let id_columns: [(&'static str, &[&str]); ID_COLUMN_COUNT] = [
        ("region", REGION_COLUMN_NAMES),
        ("country", COUNTRY_COLUMN_NAMES),
        ("latitude", LATITUDE_COLUMN_NAMES),
        ("longitude", LONGITUDE_COLUMN_NAMES),
    ];

    for (position, &(name, aliases)) in id_columns.iter().enumerate() {
        let found = headers.get(position).map(strip_bom);
        let matches = found
            .map(|h| aliases.iter().any(|alias| alias.eq_ignore_ascii_case(h)))
            .unwrap_or(false);

        if !matches {
            return Err(MalformedInputError::MissingIdColumn {
                position,
                expected: name,
                found: found.map(str::to_string),
            });
        }
    }

    if headers.len() <= ID_COLUMN_COUNT {
        return Err(MalformedInputError::NoDateColumns);
    }

    Ok(headers
        .iter()
        .skip(ID_COLUMN_COUNT)
        .map(str::to_string)
        .collect())
}

fn strip_bom(header: &str) -> &str {
    header.trim_start_matches('\u{feff}')
}

/// Convert one validated record into a RawRow
///
/// **Private** - field count already checked by the caller
fn parse_row(
    line: usize,
    record: &StringRecord,
    date_labels: &[String],
) -> Result<RawRow, MalformedInputError> {
    let region = record
        .get(0)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let country = record.get(1).unwrap_or_default().to_string();
    if country.is_empty() {
        return Err(MalformedInputError::EmptyCountry { line });
    }

    let latitude = parse_coordinate(line, record.get(2).unwrap_or_default());
    let longitude = parse_coordinate(line, record.get(3).unwrap_or_default());

    let counts = record
        .iter()
        .skip(ID_COLUMN_COUNT)
        .zip(date_labels)
        .map(|(value, label)| {
            parse_count(value).ok_or_else(|| MalformedInputError::InvalidCount {
                line,
                column: label.clone(),
                value: value.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawRow {
        line,
        region,
        country,
        latitude,
        longitude,
        counts,
    })
}

/// Parse a latitude/longitude cell. Coordinates are informational only,
/// so a bad value is logged and dropped rather than failing the load.
fn parse_coordinate(line: usize, value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }

    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!("Line {}: ignoring invalid coordinate {:?}", line, value);
            None
        }
    }
}

/// Parse a cumulative count cell
///
/// Empty cells count as 0. Integral floats (`12.0`) are accepted because
/// some exports of the feed write counts as floats.
pub fn parse_count(value: &str) -> Option<u64> {
    if value.is_empty() {
        return Some(0);
    }

    if let Ok(n) = value.parse::<u64>() {
        return Some(n);
    }

    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Some(f as u64)
        }
        _ => None,
    }
}
