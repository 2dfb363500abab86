//! Transformation of the raw table into the derived country series.
//!
//! This module turns parsed input into:
//! - Long rows, one per subdivision and date (reshape)
//! - Country-level cumulative totals (grouping)
//! - Daily increments and the trailing moving average (metrics)
//! - Headline figures and growth rates for a filtered range (summary)

pub mod grouping;
pub mod metrics;
pub mod reshape;
pub mod summary;

// Re-export main types and functions
pub use grouping::aggregate;
pub use metrics::{derive_country, derive_metrics, Corrections, DerivedRows};
pub use reshape::{reshape, LongRow, Reshaped, RowDate};
pub use summary::{calculate_growth_rates, calculate_key_metrics};
