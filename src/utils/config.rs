//! Configuration and constants for the pipeline and CLI.

use std::time::Duration;

/// Public JHU CSSE confirmed-cases time series (global, wide format)
pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";

/// Environment variable that overrides the source URL
pub const SOURCE_URL_ENV: &str = "CASECURVE_SOURCE_URL";

/// Default timeout for fetching the raw table
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Current export schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Date label formats. chrono accepts one or two digit month/day for %m/%d,
// so the primary format covers both `1/22/20` and `01/22/20`.
pub const PRIMARY_DATE_FORMAT: &str = "%m/%d/%y";
pub const FALLBACK_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Format used for dates on the command line and in exports
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// Header names for the four leading identification columns
// (the feed has used both slash and underscore spellings)
pub const REGION_COLUMN_NAMES: &[&str] = &["Province/State", "Province_State", "Province", "State"];
pub const COUNTRY_COLUMN_NAMES: &[&str] = &["Country/Region", "Country_Region", "Country"];
pub const LATITUDE_COLUMN_NAMES: &[&str] = &["Lat", "Latitude"];
pub const LONGITUDE_COLUMN_NAMES: &[&str] = &["Long", "Long_", "Lon", "Longitude"];

/// Number of leading identification columns before the first date column
pub const ID_COLUMN_COUNT: usize = 4;

/// Trailing window size for the smoothed daily series
pub const MOVING_AVERAGE_WINDOW: usize = 7;

/// Country preselected by the dashboard when present
pub const DEFAULT_COUNTRY: &str = "India";

/// Length of the default date range, ending at the latest date
pub const DEFAULT_RANGE_DAYS: i64 = 90;
