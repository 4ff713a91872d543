//! Batch-level aggregation of per-curve metrics.

use super::Metrics;
use crate::error::AggregateError;
use serde::{Deserialize, Serialize};

/// Average, minimum and maximum of one quantity across a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Arithmetic mean.
    pub average: f64,
    /// Smallest value.
    pub minimum: f64,
    /// Largest value.
    pub maximum: f64,
}

impl SummaryStats {
    /// Summarizes a non-empty set of values.
    ///
    /// `NaN` is never skipped: a single `NaN` input makes every field `NaN`.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::EmptyBatch`] when `values` is empty.
    pub fn from_values(values: &[f64]) -> Result<Self, AggregateError> {
        let (&first, rest) = values.split_first().ok_or(AggregateError::EmptyBatch)?;

        let (mut minimum, mut maximum, mut sum) = (first, first, first);
        for &value in rest {
            minimum = nan_min(minimum, value);
            maximum = nan_max(maximum, value);
            sum += value;
        }

        Ok(Self {
            average: sum / values.len() as f64,
            minimum,
            maximum,
        })
    }
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Summary statistics for every metric across a batch of curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Number of curves aggregated.
    pub simulations: usize,
    /// Last point of each curve.
    pub final_equity: SummaryStats,
    /// Total return, percent.
    pub total_return: SummaryStats,
    /// Maximum drawdown, percent.
    pub max_drawdown: SummaryStats,
    /// Sharpe ratio.
    pub sharpe_ratio: SummaryStats,
    /// Profit factor.
    pub profit_factor: SummaryStats,
    /// Volatility, percent.
    pub volatility: SummaryStats,
    /// Average per-trade return, percent.
    pub average_return: SummaryStats,
}

impl AggregateReport {
    /// Labelled statistics in display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, SummaryStats); 7] {
        [
            ("Final Equity", self.final_equity),
            ("Total Return (%)", self.total_return),
            ("Max Drawdown (%)", self.max_drawdown),
            ("Sharpe Ratio", self.sharpe_ratio),
            ("Profit Factor", self.profit_factor),
            ("Volatility (%)", self.volatility),
            ("Average Return (%)", self.average_return),
        ]
    }
}

/// Aggregates per-curve metrics and final equities.
///
/// `metrics[i]` and `final_equities[i]` must describe the same curve.
///
/// # Errors
///
/// - [`AggregateError::EmptyBatch`] when there are no curves.
/// - [`AggregateError::LengthMismatch`] when the two slices differ in length.
pub fn aggregate(
    metrics: &[Metrics],
    final_equities: &[f64],
) -> Result<AggregateReport, AggregateError> {
    if metrics.len() != final_equities.len() {
        return Err(AggregateError::LengthMismatch {
            metrics: metrics.len(),
            final_equities: final_equities.len(),
        });
    }
    if metrics.is_empty() {
        return Err(AggregateError::EmptyBatch);
    }

    let field = |f: fn(&Metrics) -> f64| -> Result<SummaryStats, AggregateError> {
        let values: Vec<f64> = metrics.iter().map(f).collect();
        SummaryStats::from_values(&values)
    };

    Ok(AggregateReport {
        simulations: metrics.len(),
        final_equity: SummaryStats::from_values(final_equities)?,
        total_return: field(|m| m.total_return)?,
        max_drawdown: field(|m| m.max_drawdown)?,
        sharpe_ratio: field(|m| m.sharpe_ratio)?,
        profit_factor: field(|m| m.profit_factor)?,
        volatility: field(|m| m.volatility)?,
        average_return: field(|m| m.average_return)?,
    })
}
