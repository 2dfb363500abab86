//! In-memory store for the derived series.
//!
//! Holds one immutable snapshot at a time and answers the country-list and
//! range-filter queries against it.

pub mod series_store;
pub mod snapshot;

pub use series_store::{process_table, LoadReport, SeriesStore, StoreState};
pub use snapshot::SeriesSnapshot;
