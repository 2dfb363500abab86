//! Filter command implementation.
//!
//! The filter command:
//! 1. Loads and derives the dataset
//! 2. Resolves the country and date range (dashboard defaults if omitted)
//! 3. Filters the series
//! 4. Prints rows or a key-metrics summary
//! 5. Optionally writes the export JSON

use super::load::load_store;
use super::models::FilterArgs;
use crate::aggregator::calculate_key_metrics;
use crate::output::{build_export, write_export};
use crate::parser::dates::parse_iso_date;
use crate::parser::schema::CountryDayRow;
use crate::store::SeriesStore;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};

/// Validate filter arguments
///
/// **Public** - can be called before execute_filter for early validation
pub fn validate_filter_args(args: &FilterArgs) -> Result<()> {
    args.source.validate()?;

    if let Some(country) = &args.country {
        if country.trim().is_empty() {
            anyhow::bail!("country cannot be empty");
        }
    }

    let start = parse_optional_date("start", args.start.as_deref())?;
    let end = parse_optional_date("end", args.end.as_deref())?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            anyhow::bail!("start date {} is after end date {}", start, end);
        }
    }

    Ok(())
}

fn parse_optional_date(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(v) => parse_iso_date(v)
            .map(Some)
            .ok_or_else(|| anyhow::anyhow!("{} date {:?} is not YYYY-MM-DD", name, v)),
    }
}

/// Resolved filter request
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRequest {
    pub country: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Fill in the dashboard defaults for anything the caller left out
///
/// **Public** - country defaults to the preselected one, dates to the
/// trailing default range
pub fn resolve_request(store: &SeriesStore, args: &FilterArgs) -> Result<FilterRequest> {
    let country = match &args.country {
        Some(country) => country.clone(),
        None => store
            .default_country()?
            .context("Dataset contains no countries")?,
    };

    let (default_start, default_end) = store
        .default_range()?
        .context("Dataset contains no dates")?;

    let start = parse_optional_date("start", args.start.as_deref())?.unwrap_or(default_start);
    let end = parse_optional_date("end", args.end.as_deref())?.unwrap_or(default_end);

    Ok(FilterRequest {
        country,
        start,
        end,
    })
}

/// Execute the filter command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The filtered rows
pub fn execute_filter(args: &FilterArgs) -> Result<Vec<CountryDayRow>> {
    validate_filter_args(args)?;

    let (store, _report) = load_store(&args.source)?;
    let request = resolve_request(&store, args)?;

    info!(
        "Filtering {} from {} to {}",
        request.country, request.start, request.end
    );

    let rows = store
        .filter(&request.country, request.start, request.end)
        .context("Failed to filter series")?;

    if rows.is_empty() {
        warn!(
            "No data available for {} between {} and {}",
            request.country, request.start, request.end
        );
    }

    if args.print_summary {
        print_summary(&request, &rows);
    } else {
        print_rows(&rows);
    }

    if let Some(path) = &args.output_json {
        let export = build_export(&request.country, request.start, request.end, rows.clone());
        write_export(&export, path).context("Failed to write series JSON")?;
        info!("✓ Series written to: {}", path.display());
    }

    Ok(rows)
}

fn print_rows(rows: &[CountryDayRow]) {
    println!(
        "{:<12} {:>12} {:>10} {:>12}",
        "date", "cumulative", "daily_new", "7day_avg"
    );
    for row in rows {
        println!(
            "{:<12} {:>12} {:>10} {:>12.1}",
            row.date, row.cumulative, row.daily_new, row.seven_day_avg
        );
    }
}

fn print_summary(request: &FilterRequest, rows: &[CountryDayRow]) {
    println!("\n{}", "=".repeat(60));
    println!("{} ({} to {})", request.country, request.start, request.end);
    println!("{}", "=".repeat(60));

    match calculate_key_metrics(rows) {
        Some(metrics) => println!("{}", metrics.summary()),
        None => println!("No data in range"),
    }

    println!("{}", "=".repeat(60));
}
