//! Country-level aggregation of long rows.
//!
//! Sums cumulative counts across every subdivision of a country for each
//! reporting date. Rows with an invalid date are skipped; the reshaper has
//! already counted them.

use super::reshape::LongRow;
use crate::parser::schema::CountryDayRow;
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// Group long rows by (country, date) and sum their cumulative counts
///
/// **Public** - second pipeline stage
///
/// # Returns
/// One row per distinct (country, date), ordered by country then date,
/// with `daily_new` and `seven_day_avg` left at zero
pub fn aggregate(rows: &[LongRow]) -> Vec<CountryDayRow> {
    let mut totals: BTreeMap<(&str, NaiveDate), u64> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in rows {
        let Some(date) = row.date.as_date() else {
            skipped += 1;
            continue;
        };

        let total = totals.entry((row.country.as_str(), date)).or_insert(0);
        *total = total.saturating_add(row.cumulative);
    }

    debug!(
        "Aggregated {} long rows into {} country-days ({} skipped with invalid dates)",
        rows.len(),
        totals.len(),
        skipped
    );

    totals
        .into_iter()
        .map(|((country, date), cumulative)| CountryDayRow::new(country, date, cumulative))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::reshape::RowDate;

    fn long(country: &str, region: Option<&str>, date: RowDate, cumulative: u64) -> LongRow {
        LongRow {
            country: country.to_string(),
            region: region.map(str::to_string),
            date,
            cumulative,
        }
    }

    fn day(d: u32) -> RowDate {
        RowDate::Parsed(NaiveDate::from_ymd_opt(2020, 3, d).unwrap())
    }

    #[test]
    fn test_sums_across_regions_including_unnamed() {
        let rows = vec![
            long("Canada", Some("Ontario"), day(1), 5),
            long("Canada", Some("Quebec"), day(1), 7),
            long("Canada", None, day(1), 1),
            long("Canada", Some("Ontario"), day(2), 6),
        ];

        let out = aggregate(&rows);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].cumulative, 13);
        assert_eq!(out[1].cumulative, 6);
        assert_eq!(out[0].daily_new, 0);
        assert_eq!(out[0].seven_day_avg, 0.0);
    }

    #[test]
    fn test_orders_by_country_then_date() {
        let rows = vec![
            long("Zambia", None, day(2), 1),
            long("Albania", None, day(3), 1),
            long("Albania", None, day(1), 1),
        ];

        let out = aggregate(&rows);
        let keys: Vec<(&str, u32)> = out
            .iter()
            .map(|r| (r.country.as_str(), chrono::Datelike::day(&r.date)))
            .collect();

        assert_eq!(keys, vec![("Albania", 1), ("Albania", 3), ("Zambia", 2)]);
    }

    #[test]
    fn test_invalid_dates_excluded() {
        let rows = vec![
            long("X", None, day(1), 3),
            long(
                "X",
                None,
                RowDate::Invalid {
                    label: "??".to_string(),
                },
                100,
            ),
        ];

        let out = aggregate(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].cumulative, 3);
    }
}
