//! Immutable derived table and its read-only queries.

use crate::parser::schema::CountryDayRow;
use crate::utils::config::{DEFAULT_COUNTRY, DEFAULT_RANGE_DAYS};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::ops::Range;

/// One fully derived dataset
///
/// Rows are ordered by country then date. The sorted country list and a
/// per-country row range are computed once at construction.
#[derive(Debug, Clone, Default)]
pub struct SeriesSnapshot {
    rows: Vec<CountryDayRow>,
    countries: Vec<String>,
    ranges: HashMap<String, Range<usize>>,
}

impl SeriesSnapshot {
    /// Build a snapshot from derived rows
    ///
    /// Rows are re-sorted by (country, date) so the per-country ranges are
    /// contiguous regardless of input order.
    pub fn new(mut rows: Vec<CountryDayRow>) -> Self {
        rows.sort_by(|a, b| a.country.cmp(&b.country).then(a.date.cmp(&b.date)));

        let mut countries: Vec<String> = Vec::new();
        let mut ranges: HashMap<String, Range<usize>> = HashMap::new();

        for (i, row) in rows.iter().enumerate() {
            match ranges.get_mut(&row.country) {
                Some(range) => range.end = i + 1,
                None => {
                    countries.push(row.country.clone());
                    ranges.insert(row.country.clone(), i..i + 1);
                }
            }
        }

        Self {
            rows,
            countries,
            ranges,
        }
    }

    /// Every derived row, ordered by country then date
    pub fn rows(&self) -> &[CountryDayRow] {
        &self.rows
    }

    /// Distinct country names, sorted ascending
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// One country's full series, ascending by date
    pub fn country_series(&self, country: &str) -> &[CountryDayRow] {
        self.ranges
            .get(country)
            .map(|range| &self.rows[range.clone()])
            .unwrap_or(&[])
    }

    /// Rows for `country` with `start <= date <= end`, ascending by date
    ///
    /// Unknown countries and empty ranges (including `start > end`) yield
    /// an empty vector.
    pub fn filter(&self, country: &str, start: NaiveDate, end: NaiveDate) -> Vec<CountryDayRow> {
        self.country_series(country)
            .iter()
            .filter(|row| row.date >= start && row.date <= end)
            .cloned()
            .collect()
    }

    /// Earliest and latest date across all countries
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// The dashboard's preselected country: the configured default when
    /// present, otherwise the first country alphabetically
    pub fn default_country(&self) -> Option<&str> {
        if self.ranges.contains_key(DEFAULT_COUNTRY) {
            return Some(DEFAULT_COUNTRY);
        }
        self.countries.first().map(String::as_str)
    }

    /// Trailing window ending at the latest date, clipped to the earliest
    pub fn default_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (min, max) = self.date_bounds()?;
        let start = (max - Duration::days(DEFAULT_RANGE_DAYS)).max(min);
        Some((start, max))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, d).unwrap()
    }

    fn snapshot() -> SeriesSnapshot {
        SeriesSnapshot::new(vec![
            CountryDayRow::new("Peru", date(3, 2), 2),
            CountryDayRow::new("Chile", date(3, 1), 1),
            CountryDayRow::new("Peru", date(3, 1), 1),
            CountryDayRow::new("Chile", date(3, 2), 3),
        ])
    }

    #[test]
    fn test_countries_sorted_unique() {
        assert_eq!(snapshot().countries(), ["Chile", "Peru"]);
    }

    #[test]
    fn test_country_series_contiguous() {
        let snap = snapshot();
        let peru = snap.country_series("Peru");
        assert_eq!(peru.len(), 2);
        assert!(peru[0].date < peru[1].date);
        assert!(snap.country_series("Atlantis").is_empty());
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert!(snapshot().filter("Peru", date(3, 2), date(3, 1)).is_empty());
    }

    #[test]
    fn test_default_country_falls_back_to_first() {
        assert_eq!(snapshot().default_country(), Some("Chile"));
    }

    #[test]
    fn test_default_range_clipped() {
        assert_eq!(snapshot().default_range(), Some((date(3, 1), date(3, 2))));
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = SeriesSnapshot::default();
        assert!(snap.is_empty());
        assert_eq!(snap.date_bounds(), None);
        assert_eq!(snap.default_country(), None);
    }
}
