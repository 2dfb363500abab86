use super::load::load_store;
use super::models::SourceArgs;
use crate::output::read_export;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Print every country in the dataset, one per line
pub fn list_countries(source: &SourceArgs) -> Result<Vec<String>> {
    let (store, _report) = load_store(source)?;
    let countries = store.list_countries();

    for country in &countries {
        println!("{}", country);
    }

    Ok(countries)
}

/// Validate an export JSON file
pub fn validate_export_file(file_path: PathBuf) -> Result<()> {
    println!("Validating export: {}", file_path.display());

    let export = read_export(&file_path)?;

    println!("✓ Valid export JSON");
    println!("  Version: {}", export.version);
    println!(
        "  Country: {}",
        export.country.as_deref().unwrap_or("(all countries)")
    );
    if let (Some(start), Some(end)) = (export.start, export.end) {
        println!("  Range: {} to {}", start, end);
    }
    println!("  Rows: {}", export.rows.len());
    if let Some(metrics) = &export.metrics {
        println!("  {}", metrics.summary());
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Casecurve Series Export Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  country: string?         - Selected country (absent for full-table exports)");
        println!("  start: date?             - Inclusive range start (YYYY-MM-DD)");
        println!("  end: date?               - Inclusive range end (YYYY-MM-DD)");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!("  metrics: object?         - Key figures over the range");
        println!("    total_cases: number    - Cumulative count on the last date");
        println!("    latest_daily_new: number");
        println!("    average_daily: number");
        println!("    peak_daily: number");
        println!("    latest_growth_pct: number? - Cumulative change over the last two dates");
        println!("  growth: array            - Day-over-day change of daily_new");
        println!("  rows: array              - One entry per country and date");
        println!("    country: string");
        println!("    date: date");
        println!("    cumulative: number     - Sum over all subdivisions");
        println!("    daily_new: number      - Increase over previous date, floored at 0");
        println!("    seven_day_avg: number  - Trailing mean of daily_new (up to 7 points)");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Casecurve v{}", env!("CARGO_PKG_VERSION"));
    println!("Export Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Reshapes wide case-count time series into per-country daily trends.");
}
