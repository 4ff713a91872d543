//! CSV exports of raw curves and per-simulation metrics.

use crate::error::Result;
use eqsim_domain::{EquityCurve, Metrics};

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Raw equity points: one row per trade index, one column per simulation.
///
/// Curves shorter than the longest leave their trailing cells empty.
pub fn export_curves_csv(curves: &[EquityCurve]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Trade Number".to_string()];
    header.extend((1..=curves.len()).map(|i| format!("Simulation {i}")));
    writer.write_record(&header)?;

    let rows = curves.iter().map(EquityCurve::len).max().unwrap_or(0);
    for trade in 0..rows {
        let mut record = vec![trade.to_string()];
        record.extend(
            curves
                .iter()
                .map(|c| c.points().get(trade).map(f64::to_string).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    finish(writer)
}

/// Per-simulation metrics with full precision.
///
/// Non-finite values are written as `inf`, `-inf` and `NaN`.
pub fn export_results_csv(curves: &[EquityCurve], metrics: &[Metrics]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "simulation",
        "final_equity",
        "total_return_pct",
        "max_drawdown_pct",
        "sharpe_ratio",
        "profit_factor",
        "volatility_pct",
        "average_return_pct",
    ])?;

    for (index, (curve, m)) in curves.iter().zip(metrics).enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            curve.final_equity().to_string(),
            m.total_return.to_string(),
            m.max_drawdown.to_string(),
            m.sharpe_ratio.to_string(),
            m.profit_factor.to_string(),
            m.volatility.to_string(),
            m.average_return.to_string(),
        ])?;
    }
    finish(writer)
}
