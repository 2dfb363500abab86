//! Derived per-country metrics: daily increments and the 7-point trend.
//!
//! Derivation is order dependent, so every country's rows are sorted by
//! date before anything is computed. Negative day-over-day deltas (data
//! corrections in the feed) are clamped to zero; the clamped amount is
//! tallied in `Corrections` so the loss is visible in the load report.

use crate::parser::schema::CountryDayRow;
use crate::utils::config::MOVING_AVERAGE_WINDOW;
use crate::utils::error::EmptySeriesError;
use log::debug;
use std::collections::BTreeMap;

/// Downward corrections suppressed by the zero clamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Corrections {
    /// Number of days where the cumulative count decreased
    pub count: usize,

    /// Sum of the decreases that were clamped away
    pub magnitude: u64,
}

impl Corrections {
    fn merge(&mut self, other: Corrections) {
        self.count += other.count;
        self.magnitude = self.magnitude.saturating_add(other.magnitude);
    }
}

/// Derived table plus the corrections suppressed while deriving it
#[derive(Debug, Clone, Default)]
pub struct DerivedRows {
    pub rows: Vec<CountryDayRow>,
    pub corrections: Corrections,
}

/// Populate `daily_new` and `seven_day_avg` for every country
///
/// **Public** - third pipeline stage
///
/// Rows are grouped by country and each group sorted by date, so the
/// result does not depend on input order.
///
/// # Returns
/// Derived rows ordered by country then date
///
/// # Errors
/// * `EmptySeriesError` - a country group was empty (unreachable from grouped input)
pub fn derive_metrics(rows: Vec<CountryDayRow>) -> Result<DerivedRows, EmptySeriesError> {
    let mut by_country: BTreeMap<String, Vec<CountryDayRow>> = BTreeMap::new();
    for row in rows {
        by_country.entry(row.country.clone()).or_default().push(row);
    }

    let mut derived = DerivedRows::default();

    for (country, mut series) in by_country {
        let corrections = derive_country(&country, &mut series)?;
        if corrections.count > 0 {
            debug!(
                "{}: clamped {} downward corrections totalling {}",
                country, corrections.count, corrections.magnitude
            );
        }
        derived.corrections.merge(corrections);
        derived.rows.extend(series);
    }

    Ok(derived)
}

/// Derive one country's series in place
///
/// **Public** - usable on a single country's rows
///
/// Sorts `series` ascending by date, then:
/// - `daily_new[0] = 0`, `daily_new[i] = max(0, cumulative[i] - cumulative[i-1])`
/// - `seven_day_avg[i]` = mean of `daily_new` over the trailing window ending at `i`
///
/// # Errors
/// * `EmptySeriesError` - `series` is empty
pub fn derive_country(
    country: &str,
    series: &mut [CountryDayRow],
) -> Result<Corrections, EmptySeriesError> {
    if series.is_empty() {
        return Err(EmptySeriesError {
            country: country.to_string(),
        });
    }

    series.sort_by_key(|row| row.date);

    let mut corrections = Corrections::default();
    let mut previous: Option<u64> = None;

    for row in series.iter_mut() {
        row.daily_new = match previous {
            None => 0,
            Some(prev) => match row.cumulative.checked_sub(prev) {
                Some(delta) => delta,
                None => {
                    corrections.count += 1;
                    corrections.magnitude += prev - row.cumulative;
                    0
                }
            },
        };
        previous = Some(row.cumulative);
    }

    apply_moving_average(series, MOVING_AVERAGE_WINDOW);

    Ok(corrections)
}

/// Fill `seven_day_avg` with a trailing mean of `daily_new`
///
/// **Private** - uses fewer points near the start, never pads
fn apply_moving_average(series: &mut [CountryDayRow], window: usize) {
    let daily: Vec<u64> = series.iter().map(|r| r.daily_new).collect();
    let mut window_sum: u64 = 0;

    for (i, row) in series.iter_mut().enumerate() {
        window_sum += daily[i];
        if i >= window {
            window_sum -= daily[i - window];
        }
        let len = (i + 1).min(window);
        row.seven_day_avg = window_sum as f64 / len as f64;
    }
}
