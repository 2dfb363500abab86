//! Holder of the derived dataset and the load state machine.
//!
//! The store moves through `Unloaded -> Loaded -> Derived`. Queries are
//! answered only in `Derived`; nothing is re-derived on demand. Each
//! derived dataset is an immutable `SeriesSnapshot` behind an `Arc`, so a
//! later load swaps the reference while earlier holders keep their view.

use super::snapshot::SeriesSnapshot;
use crate::aggregator::{aggregate, derive_metrics, reshape, Corrections};
use crate::fetch::RawSource;
use crate::parser::raw_table::{parse_raw_table, RawTable};
use crate::parser::schema::CountryDayRow;
use crate::utils::error::{DateParseError, EmptySeriesError, LoadError, NotLoadedError};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Load state of a `SeriesStore`
#[derive(Debug, Clone, Default)]
pub enum StoreState {
    #[default]
    Unloaded,
    /// Raw table held, nothing derived yet
    Loaded(Arc<RawTable>),
    Derived(Arc<SeriesSnapshot>),
}

/// Diagnostics from one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub source: String,

    /// Subdivision rows in the raw table
    pub raw_rows: usize,

    pub date_columns: usize,

    /// Rows produced by reshaping (raw rows x date columns)
    pub long_rows: usize,

    /// Date labels no format could parse
    pub invalid_dates: Vec<DateParseError>,

    /// Long rows dropped because their date was unparsable
    pub excluded_rows: usize,

    pub countries: usize,

    pub country_days: usize,

    /// Downward corrections suppressed by the zero clamp
    pub corrections: Corrections,
}

impl LoadReport {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and the CLI
    pub fn summary(&self) -> String {
        format!(
            "Raw rows: {} | Dates: {} | Long rows: {} | Excluded: {} | Countries: {} | Country-days: {} | Clamped corrections: {} ({})",
            self.raw_rows,
            self.date_columns,
            self.long_rows,
            self.excluded_rows,
            self.countries,
            self.country_days,
            self.corrections.count,
            self.corrections.magnitude
        )
    }
}

/// Run reshape, aggregation and derivation over a raw table
///
/// **Public** - the pure pipeline, without any store state
///
/// # Errors
/// * `EmptySeriesError` - internal invariant violation during derivation
pub fn process_table(
    table: &RawTable,
    source: &str,
) -> Result<(SeriesSnapshot, LoadReport), EmptySeriesError> {
    info!("Step 1/3: Reshaping {} rows x {} dates...", table.row_count(), table.date_count());
    let reshaped = reshape(table);
    let excluded_rows = reshaped.invalid_row_count();

    if excluded_rows > 0 {
        warn!(
            "{} rows excluded: {} date labels could not be parsed",
            excluded_rows,
            reshaped.date_errors.len()
        );
    }

    info!("Step 2/3: Aggregating by country and date...");
    let totals = aggregate(&reshaped.rows);

    info!("Step 3/3: Deriving daily and moving-average series...");
    let derived = derive_metrics(totals)?;

    let snapshot = SeriesSnapshot::new(derived.rows);

    let report = LoadReport {
        source: source.to_string(),
        raw_rows: table.row_count(),
        date_columns: table.date_count(),
        long_rows: reshaped.rows.len(),
        invalid_dates: reshaped.date_errors,
        excluded_rows,
        countries: snapshot.countries().len(),
        country_days: snapshot.len(),
        corrections: derived.corrections,
    };

    debug!("{}", report.summary());

    Ok((snapshot, report))
}

/// Store for one loaded dataset, passed explicitly to whoever queries it
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    state: StoreState,
    source: Option<String>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn is_derived(&self) -> bool {
        matches!(self.state, StoreState::Derived(_))
    }

    /// Hold a raw table without deriving it
    ///
    /// Replaces whatever the store held before; queries fail with
    /// `NotLoadedError` until `derive` runs.
    pub fn ingest(&mut self, table: RawTable, source: impl Into<String>) {
        debug!("Ingested raw table: {} rows", table.row_count());
        self.state = StoreState::Loaded(Arc::new(table));
        self.source = Some(source.into());
    }

    /// Derive the held raw table
    ///
    /// # Errors
    /// * `LoadError::NotLoaded` - no raw table is pending (never ingested, or already derived)
    /// * `LoadError::EmptySeries` - internal invariant violation
    pub fn derive(&mut self) -> Result<LoadReport, LoadError> {
        let table = match &self.state {
            StoreState::Loaded(table) => Arc::clone(table),
            _ => return Err(NotLoadedError.into()),
        };

        let source = self.source.clone().unwrap_or_default();
        let (snapshot, report) = process_table(&table, &source)?;
        self.state = StoreState::Derived(Arc::new(snapshot));

        Ok(report)
    }

    /// Fetch, parse and derive in one step
    ///
    /// **Public** - main entry point for loading
    ///
    /// The new snapshot is published only if every step succeeds; on any
    /// error the store keeps its previous state.
    ///
    /// # Errors
    /// * `LoadError::Fetch` - the source could not supply the table
    /// * `LoadError::Malformed` - the table is structurally invalid
    pub fn load_and_process(&mut self, source: &dyn RawSource) -> Result<LoadReport, LoadError> {
        let start_time = Instant::now();
        let origin = source.describe();

        info!("Loading from: {}", origin);
        let text = source.fetch()?;

        let table = parse_raw_table(&text)?;
        info!(
            "Raw table: {} rows, {} date columns",
            table.row_count(),
            table.date_count()
        );

        let (snapshot, report) = process_table(&table, &origin)?;

        self.state = StoreState::Derived(Arc::new(snapshot));
        self.source = Some(origin);

        info!(
            "Load completed in {:.2}s: {} countries, {} country-days",
            start_time.elapsed().as_secs_f64(),
            report.countries,
            report.country_days
        );

        Ok(report)
    }

    /// Current snapshot, if derived
    ///
    /// The returned handle stays valid after the store is reloaded.
    pub fn snapshot(&self) -> Option<Arc<SeriesSnapshot>> {
        match &self.state {
            StoreState::Derived(snapshot) => Some(Arc::clone(snapshot)),
            _ => None,
        }
    }

    fn derived(&self) -> Result<&SeriesSnapshot, NotLoadedError> {
        match &self.state {
            StoreState::Derived(snapshot) => Ok(snapshot.as_ref()),
            _ => Err(NotLoadedError),
        }
    }

    /// All distinct country names, sorted ascending. Empty until derived.
    pub fn list_countries(&self) -> Vec<String> {
        self.derived()
            .map(|s| s.countries().to_vec())
            .unwrap_or_default()
    }

    /// Rows for `country` between `start` and `end` inclusive, ascending by date
    ///
    /// # Errors
    /// * `NotLoadedError` - nothing has been derived yet
    pub fn filter(
        &self,
        country: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CountryDayRow>, NotLoadedError> {
        let rows = self.derived()?.filter(country, start, end);
        debug!(
            "Filter {} {}..={}: {} rows",
            country,
            start,
            end,
            rows.len()
        );
        Ok(rows)
    }

    /// Full derived table, ordered by country then date
    pub fn rows(&self) -> Result<&[CountryDayRow], NotLoadedError> {
        Ok(self.derived()?.rows())
    }

    pub fn date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>, NotLoadedError> {
        Ok(self.derived()?.date_bounds())
    }

    pub fn default_country(&self) -> Result<Option<String>, NotLoadedError> {
        Ok(self.derived()?.default_country().map(str::to_string))
    }

    pub fn default_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>, NotLoadedError> {
        Ok(self.derived()?.default_range())
    }
}
