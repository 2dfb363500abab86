//! Tolerant parsing of report date labels.
//!
//! The feed's header uses month/day/two-digit-year labels (`1/22/20`), but
//! the padding is inconsistent and mirrors of the file have been seen with
//! four-digit years and ISO dates. Each label is tried against the primary
//! format first and then against the fallbacks in order.

use crate::utils::config::{FALLBACK_DATE_FORMATS, ISO_DATE_FORMAT, PRIMARY_DATE_FORMAT};
use chrono::NaiveDate;
use log::debug;

/// Parse a date label, trying the primary format then each fallback
///
/// **Public** - used by the reshaper once per date column
///
/// # Returns
/// The parsed date, or None if no known format matches
pub fn parse_date_label(label: &str) -> Option<NaiveDate> {
    let label = label.trim();

    if let Ok(date) = NaiveDate::parse_from_str(label, PRIMARY_DATE_FORMAT) {
        return Some(date);
    }

    for format in FALLBACK_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(label, format) {
            debug!("Date label {:?} parsed with fallback format {}", label, format);
            return Some(date);
        }
    }

    None
}

/// Parse an ISO `YYYY-MM-DD` date (command line and export files)
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}
