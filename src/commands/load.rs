//! Load command implementation.
//!
//! The load command:
//! 1. Fetches the raw table from the configured source
//! 2. Runs the reshape / aggregate / derive pipeline
//! 3. Prints the load report
//! 4. Optionally writes the full derived table

use super::models::{LoadArgs, SourceArgs};
use crate::output::{build_full_export, write_export};
use crate::store::{LoadReport, SeriesStore};
use anyhow::{Context, Result};
use log::info;

/// Load a fresh store from the configured source
///
/// **Public** - shared entry point for every data-consuming command
pub fn load_store(source: &SourceArgs) -> Result<(SeriesStore, LoadReport)> {
    source.validate()?;

    let raw_source = source.to_source()?;
    let mut store = SeriesStore::new();

    let report = store
        .load_and_process(raw_source.as_ref())
        .with_context(|| format!("Failed to load data from {}", raw_source.describe()))?;

    Ok((store, report))
}

/// Execute the load command
///
/// **Public** - main entry point called from main.rs
pub fn execute_load(args: &LoadArgs) -> Result<LoadReport> {
    let (store, report) = load_store(&args.source)?;

    print_report(&report);

    if let Some(path) = &args.output_json {
        let rows = store.rows().context("Store was not derived")?.to_vec();
        let export = build_full_export(rows);

        write_export(&export, path).context("Failed to write derived table JSON")?;
        info!("✓ Derived table written to: {}", path.display());
    }

    Ok(report)
}

/// Print the load report to stdout
fn print_report(report: &LoadReport) {
    println!("Source:        {}", report.source);
    println!("Raw rows:      {}", report.raw_rows);
    println!("Date columns:  {}", report.date_columns);
    println!("Long rows:     {}", report.long_rows);
    println!("Countries:     {}", report.countries);
    println!("Country-days:  {}", report.country_days);

    if report.excluded_rows > 0 {
        println!(
            "Excluded rows: {} ({} unparsable date labels)",
            report.excluded_rows,
            report.invalid_dates.len()
        );
        for error in &report.invalid_dates {
            println!("  - {}", error);
        }
    }

    if report.corrections.count > 0 {
        println!(
            "Clamped corrections: {} (total {})",
            report.corrections.count, report.corrections.magnitude
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_store_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confirmed.csv");
        std::fs::write(
            &path,
            "Province/State,Country/Region,Lat,Long,1/22/20,1/23/20\n,Japan,36,138,2,5\n",
        )
        .unwrap();

        let source = SourceArgs {
            input: Some(path),
            ..Default::default()
        };
        let (store, report) = load_store(&source).unwrap();

        assert_eq!(report.country_days, 2);
        assert_eq!(store.list_countries(), vec!["Japan"]);
    }

    #[test]
    fn test_execute_load_writes_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("confirmed.csv");
        let output = dir.path().join("out/derived.json");
        std::fs::write(
            &input,
            "Province/State,Country/Region,Lat,Long,1/22/20\n,Japan,36,138,2\n,Chad,15,19,0\n",
        )
        .unwrap();

        let args = LoadArgs {
            source: SourceArgs {
                input: Some(input),
                ..Default::default()
            },
            output_json: Some(output.clone()),
        };
        execute_load(&args).unwrap();

        let export = crate::output::read_export(&output).unwrap();
        assert_eq!(export.rows.len(), 2);
        assert_eq!(export.rows[0].country, "Chad");
    }

    #[test]
    fn test_load_store_bad_url() {
        let source = SourceArgs {
            url: "ftp://example.com/data.csv".to_string(),
            input: None,
        };
        assert!(load_store(&source).is_err());
    }
}
