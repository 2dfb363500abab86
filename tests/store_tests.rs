use casecurve::fetch::TextSource;
use casecurve::store::{SeriesStore, StoreState};
use casecurve::utils::error::{LoadError, MalformedInputError, NotLoadedError};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

const TABLE: &str = "\
Province/State,Country/Region,Lat,Long,3/1/20,3/2/20,3/3/20,3/4/20,3/5/20
,Italy,41.87,12.56,1694,2036,2502,3089,3858
,Germany,51.16,10.45,130,159,196,262,482
Hubei,China,30.97,112.27,66907,67103,67217,67332,67466
Beijing,China,40.18,116.41,414,414,415,416,418
";

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
}

fn loaded() -> SeriesStore {
    let mut store = SeriesStore::new();
    store
        .load_and_process(&TextSource::new("fixture", TABLE))
        .unwrap();
    store
}

#[test]
fn test_list_countries_sorted() {
    assert_eq!(loaded().list_countries(), vec!["China", "Germany", "Italy"]);
}

#[test]
fn test_list_countries_empty_before_load() {
    assert!(SeriesStore::new().list_countries().is_empty());
}

#[test]
fn test_filter_before_load_fails() {
    let store = SeriesStore::new();
    assert_eq!(store.filter("Italy", date(1), date(5)), Err(NotLoadedError));
}

#[test]
fn test_filter_boundaries_inclusive() {
    let rows = loaded().filter("Italy", date(2), date(4)).unwrap();
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();

    assert_eq!(dates, vec![date(2), date(3), date(4)]);
    assert_eq!(rows[0].cumulative, 2036);
    assert_eq!(rows[0].daily_new, 342);
}

#[test]
fn test_filter_single_day() {
    let rows = loaded().filter("Germany", date(5), date(5)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].daily_new, 220);
}

#[test]
fn test_filter_unknown_country_is_empty() {
    let rows = loaded().filter("Nonexististan", date(1), date(5)).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_filter_out_of_range_is_empty() {
    let store = loaded();
    let rows = store
        .filter(
            "Italy",
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
        )
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_filter_sums_subdivisions() {
    let rows = loaded().filter("China", date(1), date(1)).unwrap();
    assert_eq!(rows[0].cumulative, 66907 + 414);
}

#[test]
fn test_malformed_load_publishes_nothing() {
    let mut store = SeriesStore::new();
    let bad = TextSource::new("bad", "Country,Lat,Long\nItaly,1,2\n");

    let err = store.load_and_process(&bad).unwrap_err();

    assert!(matches!(
        err,
        LoadError::Malformed(MalformedInputError::MissingIdColumn { .. })
    ));
    assert!(matches!(store.state(), StoreState::Unloaded));
}

#[test]
fn test_failed_reload_keeps_previous_snapshot() {
    let mut store = loaded();
    let bad = TextSource::new(
        "ragged",
        "Province/State,Country/Region,Lat,Long,3/1/20\n,Italy,1,2\n",
    );

    assert!(store.load_and_process(&bad).is_err());
    assert_eq!(store.list_countries().len(), 3);
}

#[test]
fn test_held_snapshot_survives_reload() {
    let mut store = loaded();
    let held = store.snapshot().unwrap();

    let replacement = TextSource::new(
        "replacement",
        "Province/State,Country/Region,Lat,Long,3/1/20\n,Peru,-9.19,-75.01,0\n",
    );
    store.load_and_process(&replacement).unwrap();

    assert_eq!(store.list_countries(), vec!["Peru"]);
    assert_eq!(held.countries(), ["China", "Germany", "Italy"]);
    assert_eq!(held.filter("Italy", date(1), date(5)).len(), 5);
}

#[test]
fn test_load_report_counts_excluded_rows() {
    let text = "\
Province/State,Country/Region,Lat,Long,3/1/20,??,3/3/20
,Italy,0,0,1,2,3
,Spain,0,0,4,5,6
";
    let mut store = SeriesStore::new();
    let report = store
        .load_and_process(&TextSource::new("gappy", text))
        .unwrap();

    assert_eq!(report.long_rows, 6);
    assert_eq!(report.excluded_rows, 2);
    assert_eq!(report.invalid_dates.len(), 1);
    assert_eq!(report.country_days, 4);

    // the gap is not interpolated: 3/3 diffs against 3/1
    let rows = store.filter("Spain", date(1), date(3)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].daily_new, 2);
}

#[test]
fn test_dashboard_defaults() {
    let store = loaded();

    assert_eq!(store.date_bounds().unwrap(), Some((date(1), date(5))));
    assert_eq!(store.default_country().unwrap(), Some("China".to_string()));
    assert_eq!(store.default_range().unwrap(), Some((date(1), date(5))));
}
