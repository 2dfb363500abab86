//! Output schema definitions for the derived series.
//!
//! These are the types handed to charting consumers and written to JSON.
//! The export is versioned to allow future evolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One country's figures for one reporting date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDayRow {
    pub country: String,

    pub date: NaiveDate,

    /// Running total summed over all subdivisions of the country
    pub cumulative: u64,

    /// Increase over the previous reported date, floored at zero
    pub daily_new: u64,

    /// Trailing mean of `daily_new` over up to seven points
    pub seven_day_avg: f64,
}

impl CountryDayRow {
    /// Row with only the cumulative field populated
    pub fn new(country: impl Into<String>, date: NaiveDate, cumulative: u64) -> Self {
        Self {
            country: country.into(),
            date,
            cumulative,
            daily_new: 0,
            seven_day_avg: 0.0,
        }
    }
}

/// Headline figures over a filtered range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// Cumulative count on the last date in range
    pub total_cases: u64,

    /// New cases on the last date in range
    pub latest_daily_new: u64,

    /// Mean of daily new cases across the range
    pub average_daily: f64,

    /// Largest single-day increase in range
    pub peak_daily: u64,

    /// Percent change of the cumulative count over the last two dates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_growth_pct: Option<f64>,
}

impl KeyMetrics {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and the CLI
    pub fn summary(&self) -> String {
        let growth = self
            .latest_growth_pct
            .map(|g| format!("{:.2}%", g))
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            "Total: {} ({} new) | Avg daily: {:.0} | Peak daily: {} | Latest growth: {}",
            self.total_cases, self.latest_daily_new, self.average_daily, self.peak_daily, growth
        )
    }
}

/// Day-over-day percent change of daily new cases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,

    /// None on the first date and when the previous day had no new cases
    pub growth_pct: Option<f64>,
}

/// Filtered series written to disk for a charting tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesExport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Country the rows were filtered to; None for a full-table export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    pub start: Option<NaiveDate>,

    pub end: Option<NaiveDate>,

    /// Timestamp when the export was generated
    pub generated_at: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<KeyMetrics>,

    #[serde(default)]
    pub growth: Vec<GrowthPoint>,

    pub rows: Vec<CountryDayRow>,
}
