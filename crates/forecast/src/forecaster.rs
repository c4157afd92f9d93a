//! Forecasting collaborator seam.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::series::{MIN_DISTINCT_DATES, UsagePoint, distinct_dates};

/// Point forecast with confidence bounds for one future period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastError {
    /// Fewer than [`MIN_DISTINCT_DATES`] distinct dated observations.
    #[error("not enough usage data ({distinct} distinct dated observation(s), need {MIN_DISTINCT_DATES})")]
    NotEnoughData { distinct: usize },

    #[error("forecast horizon must be at least one period")]
    EmptyHorizon,
}

/// Produces future-demand estimates from a chronological usage series.
///
/// The production model is an external time-series library; anything
/// implementing this trait can stand in for it. Implementations must not
/// mutate domain state.
pub trait Forecaster: Send + Sync {
    /// Forecast `periods` days beyond the last observation.
    ///
    /// `series` is chronological per-resource USE data. Fails with
    /// `NotEnoughData` below [`MIN_DISTINCT_DATES`] distinct dates.
    fn forecast(&self, series: &[UsagePoint], periods: u32)
    -> Result<Vec<ForecastPoint>, ForecastError>;
}

/// Deterministic least-squares reference forecaster.
///
/// Fits `y = intercept + slope * day` over the observations and projects
/// it forward; the confidence band is the sample standard deviation of
/// the residuals scaled by `band_width`. Stands in for the external
/// model in tests and the CLI.
#[derive(Debug, Clone, Copy)]
pub struct LinearTrendForecaster {
    /// Residual-spread multiplier for the lower/upper bounds.
    band_width: f64,
}

impl Default for LinearTrendForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearTrendForecaster {
    pub fn new() -> Self {
        Self { band_width: 2.0 }
    }

    pub fn with_band_width(mut self, band_width: f64) -> Self {
        self.band_width = band_width;
        self
    }
}

impl Forecaster for LinearTrendForecaster {
    fn forecast(
        &self,
        series: &[UsagePoint],
        periods: u32,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        if periods == 0 {
            return Err(ForecastError::EmptyHorizon);
        }

        let distinct = distinct_dates(series);
        if distinct < MIN_DISTINCT_DATES {
            return Err(ForecastError::NotEnoughData { distinct });
        }

        let origin = series[0].date;
        let xs: Vec<f64> = series
            .iter()
            .map(|p| (p.date - origin).num_days() as f64)
            .collect();
        let ys: Vec<f64> = series.iter().map(|p| p.quantity as f64).collect();

        let (slope, intercept) = least_squares(&xs, &ys);

        let residuals: Vec<f64> = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| y - (intercept + slope * x))
            .collect();
        let spread = stddev_sample(&residuals) * self.band_width;

        let last_date = series[series.len() - 1].date;
        let mut points = Vec::with_capacity(periods as usize);
        for period in 1..=i64::from(periods) {
            let date = last_date + Duration::days(period);
            let x = (date - origin).num_days() as f64;
            let predicted = intercept + slope * x;
            points.push(ForecastPoint {
                date,
                predicted,
                lower: predicted - spread,
                upper: predicted + spread,
            });
        }

        Ok(points)
    }
}

/// Ordinary least squares over (x, y); callers guarantee at least two
/// distinct x values, so the denominator is non-zero.
fn least_squares(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        numerator += (x - mean_x) * (y - mean_y);
        denominator += (x - mean_x) * (x - mean_x);
    }

    let slope = numerator / denominator;
    (slope, mean_y - slope * mean_x)
}

/// Sample standard deviation (n-1), deterministic.
fn stddev_sample(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    let var = xs
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / ((xs.len() - 1) as f64);
    var.sqrt()
}
