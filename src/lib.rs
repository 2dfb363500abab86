//! Casecurve
//!
//! Reshapes a wide case-count time series (one column per reporting
//! date) into a per-country daily series with cumulative, daily new and
//! 7-day smoothed figures, and answers country and date-range queries
//! over it.
//!
//! ## Getting Started
//!
//! ```ignore
//! use casecurve::fetch::HttpSource;
//! use casecurve::store::SeriesStore;
//! use casecurve::utils::config::DEFAULT_SOURCE_URL;
//!
//! let mut store = SeriesStore::new();
//! let report = store.load_and_process(&HttpSource::new(DEFAULT_SOURCE_URL)?)?;
//! let countries = store.list_countries();
//! let rows = store.filter("Italy", start, end)?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod store;
pub mod utils;
