//! Demand-forecasting support.
//!
//! The statistical model itself is an external collaborator; this crate
//! owns everything around it: turning the usage ledger into per-resource
//! chronological series, the [`Forecaster`] seam the model plugs into, a
//! deterministic linear-trend reference implementation for tests and the
//! CLI, and the dashboard's restocking/expiry alert rules.

pub mod alerts;
pub mod forecaster;
pub mod series;

pub use alerts::{
    EXPIRY_WINDOW_DAYS, ExpiryAlert, RESTOCK_THRESHOLD, RestockAlert, expiry_alerts,
    restock_alerts,
};
pub use forecaster::{Forecaster, ForecastError, ForecastPoint, LinearTrendForecaster};
pub use series::{MIN_DISTINCT_DATES, UsagePoint, distinct_dates, resources_with_usage, usage_series};
