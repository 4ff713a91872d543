use crate::value_objects::equity_curve::EquityCurve;
use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod drawdown;
pub mod returns;

/// Performance and risk metrics for one equity curve.
///
/// Percent-valued fields are already multiplied by 100. Degenerate curves
/// yield `NaN` or `+inf` rather than an error; see [`compute_metrics`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Largest decline from a running peak, in percent.
    pub max_drawdown: f64,
    /// Annualized Sharpe ratio of per-trade returns.
    pub sharpe_ratio: f64,
    /// Summed gains over absolute summed losses.
    pub profit_factor: f64,
    /// First-to-last return, in percent.
    pub total_return: f64,
    /// Mean per-trade return, in percent.
    pub average_return: f64,
    /// Population standard deviation of per-trade returns, in percent.
    pub volatility: f64,
}

/// Computes the metric suite for a single curve.
///
/// Degenerate outcomes:
/// - `profit_factor` is `+inf` with no losing trades and `NaN` with neither gains nor losses.
/// - `sharpe_ratio` is `NaN` when all returns are identical.
/// - A one-point curve has no returns, so every return-based metric is `NaN`.
#[must_use]
pub fn compute_metrics(curve: &EquityCurve) -> Metrics {
    let equity = curve.points();
    let rets = curve.returns();
    let first = curve.starting_equity();

    Metrics {
        max_drawdown: drawdown::max_drawdown_pct(equity),
        sharpe_ratio: returns::sharpe_ratio(&rets),
        profit_factor: returns::profit_factor(&rets),
        total_return: (curve.final_equity() - first) / first * 100.0,
        average_return: returns::mean(&rets) * 100.0,
        volatility: returns::population_std_dev(&rets) * 100.0,
    }
}
