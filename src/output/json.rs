//! JSON export writer.
//!
//! Writes `SeriesExport` structs to JSON files for charting tools.

use crate::aggregator::{calculate_growth_rates, calculate_key_metrics};
use crate::parser::schema::{CountryDayRow, SeriesExport};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Build an export for one country's filtered range
///
/// **Public** - attaches key metrics and growth rates to the rows
pub fn build_export(
    country: &str,
    start: NaiveDate,
    end: NaiveDate,
    rows: Vec<CountryDayRow>,
) -> SeriesExport {
    SeriesExport {
        version: SCHEMA_VERSION.to_string(),
        country: Some(country.to_string()),
        start: Some(start),
        end: Some(end),
        generated_at: Utc::now().to_rfc3339(),
        metrics: calculate_key_metrics(&rows),
        growth: calculate_growth_rates(&rows),
        rows,
    }
}

/// Build an export of the full derived table
pub fn build_full_export(rows: Vec<CountryDayRow>) -> SeriesExport {
    let start = rows.iter().map(|r| r.date).min();
    let end = rows.iter().map(|r| r.date).max();

    SeriesExport {
        version: SCHEMA_VERSION.to_string(),
        country: None,
        start,
        end,
        generated_at: Utc::now().to_rfc3339(),
        metrics: None,
        growth: Vec::new(),
        rows,
    }
}

/// Write an export to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `export` - Export data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_export(export: &SeriesExport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing export to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, export).map_err(OutputError::SerializationFailed)?;

    info!(
        "Export written successfully ({} rows, {} bytes)",
        export.rows.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize an export to a pretty JSON string
pub fn export_to_string(export: &SeriesExport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(export).map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read an export from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_export(input_path: impl AsRef<Path>) -> Result<SeriesExport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading export from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let export: SeriesExport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Export loaded: version {}, {} rows",
        export.version,
        export.rows.len()
    );

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_export() -> SeriesExport {
        let day = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        let rows = vec![
            CountryDayRow {
                country: "Italy".to_string(),
                date: day,
                cumulative: 100,
                daily_new: 0,
                seven_day_avg: 0.0,
            },
            CountryDayRow {
                country: "Italy".to_string(),
                date: day.succ_opt().unwrap(),
                cumulative: 130,
                daily_new: 30,
                seven_day_avg: 15.0,
            },
        ];
        build_export("Italy", day, day.succ_opt().unwrap(), rows)
    }

    #[test]
    fn test_write_and_read_export() {
        let export = create_test_export();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_export(&export, path).unwrap();
        let loaded = read_export(path).unwrap();

        assert_eq!(loaded.version, SCHEMA_VERSION);
        assert_eq!(loaded.country.as_deref(), Some("Italy"));
        assert_eq!(loaded.rows, export.rows);
        assert_eq!(loaded.metrics, export.metrics);
    }

    #[test]
    fn test_export_row_fields() {
        let json = export_to_string(&create_test_export()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let row = &value["rows"][1];

        assert_eq!(row["date"], "2020-04-02");
        assert_eq!(row["cumulative"], 130);
        assert_eq!(row["daily_new"], 30);
        assert_eq!(row["seven_day_avg"], 15.0);
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/series.json");

        write_export(&create_test_export(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_full_export_bounds() {
        let export = create_test_export();
        let full = build_full_export(export.rows);

        assert!(full.country.is_none());
        assert_eq!(full.start, NaiveDate::from_ymd_opt(2020, 4, 1));
        assert_eq!(full.end, NaiveDate::from_ymd_opt(2020, 4, 2));
    }
}
