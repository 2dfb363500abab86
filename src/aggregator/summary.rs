//! Headline figures and growth rates over a filtered range.
//!
//! These back the dashboard's metric tiles and growth chart. Input rows
//! must be one country's series in ascending date order, as returned by
//! `SeriesStore::filter`.

use crate::parser::schema::{CountryDayRow, GrowthPoint, KeyMetrics};

/// Calculate key metrics over a filtered series
///
/// **Public** - main entry point for the summary tiles
///
/// # Returns
/// None for an empty series
pub fn calculate_key_metrics(rows: &[CountryDayRow]) -> Option<KeyMetrics> {
    let last = rows.last()?;

    let total_daily: u64 = rows.iter().map(|r| r.daily_new).sum();
    let average_daily = total_daily as f64 / rows.len() as f64;
    let peak_daily = rows.iter().map(|r| r.daily_new).max().unwrap_or(0);

    let latest_growth_pct = match rows {
        [.., prev, latest] => percent_change(prev.cumulative, latest.cumulative),
        _ => None,
    };

    Some(KeyMetrics {
        total_cases: last.cumulative,
        latest_daily_new: last.daily_new,
        average_daily,
        peak_daily,
        latest_growth_pct,
    })
}

/// Day-over-day percent change of `daily_new`
///
/// **Public** - data for the growth-rate chart
pub fn calculate_growth_rates(rows: &[CountryDayRow]) -> Vec<GrowthPoint> {
    let mut previous: Option<u64> = None;

    rows.iter()
        .map(|row| {
            let growth_pct = previous.and_then(|prev| percent_change(prev, row.daily_new));
            previous = Some(row.daily_new);
            GrowthPoint {
                date: row.date,
                growth_pct,
            }
        })
        .collect()
}

/// Percent change from `from` to `to`; undefined when `from` is zero
fn percent_change(from: u64, to: u64) -> Option<f64> {
    if from == 0 {
        return None;
    }
    Some((to as f64 - from as f64) / from as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: u32, cumulative: u64, daily_new: u64) -> CountryDayRow {
        CountryDayRow {
            country: "X".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 5, day).unwrap(),
            cumulative,
            daily_new,
            seven_day_avg: 0.0,
        }
    }

    #[test]
    fn test_key_metrics() {
        let rows = vec![row(1, 100, 0), row(2, 120, 20), row(3, 150, 30), row(4, 160, 10)];
        let metrics = calculate_key_metrics(&rows).unwrap();

        assert_eq!(metrics.total_cases, 160);
        assert_eq!(metrics.latest_daily_new, 10);
        assert_eq!(metrics.average_daily, 15.0);
        assert_eq!(metrics.peak_daily, 30);
        let growth = metrics.latest_growth_pct.unwrap();
        assert!((growth - 6.666_666).abs() < 1e-3);
    }

    #[test]
    fn test_key_metrics_single_row() {
        let metrics = calculate_key_metrics(&[row(1, 5, 0)]).unwrap();
        assert_eq!(metrics.latest_growth_pct, None);
    }

    #[test]
    fn test_key_metrics_empty() {
        assert!(calculate_key_metrics(&[]).is_none());
    }

    #[test]
    fn test_growth_from_zero_cumulative() {
        let metrics = calculate_key_metrics(&[row(1, 0, 0), row(2, 4, 4)]).unwrap();
        assert_eq!(metrics.latest_growth_pct, None);
    }

    #[test]
    fn test_growth_rates() {
        let rows = vec![row(1, 10, 0), row(2, 20, 10), row(3, 35, 15), row(4, 40, 5)];
        let growth: Vec<Option<f64>> = calculate_growth_rates(&rows)
            .into_iter()
            .map(|g| g.growth_pct)
            .collect();

        assert_eq!(growth.len(), 4);
        assert_eq!(growth[0], None);
        // previous day had zero new cases
        assert_eq!(growth[1], None);
        assert_eq!(growth[2], Some(50.0));
        assert!((growth[3].unwrap() + 66.667).abs() < 1e-3);
    }
}
