//! JSON report.
//!
//! JSON has no literal for `NaN` or infinity, so those are written as the
//! strings `"NaN"`, `"inf"` and `"-inf"` instead of collapsing to `null`.

use crate::Report;
use crate::error::Result;
use chrono::{DateTime, Utc};
use eqsim_domain::{EquityCurve, Metrics, ParameterSet, SummaryStats};
use serde::{Serialize, Serializer};

/// A float that survives JSON serialization when it is not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsonFloat(pub f64);

impl Serialize for JsonFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_finite() {
            serializer.serialize_f64(v)
        } else if v.is_nan() {
            serializer.serialize_str("NaN")
        } else if v > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }
}

#[derive(Serialize)]
struct JsonStats {
    average: JsonFloat,
    minimum: JsonFloat,
    maximum: JsonFloat,
}

impl From<SummaryStats> for JsonStats {
    fn from(s: SummaryStats) -> Self {
        Self {
            average: JsonFloat(s.average),
            minimum: JsonFloat(s.minimum),
            maximum: JsonFloat(s.maximum),
        }
    }
}

#[derive(Serialize)]
struct JsonSummaryRow {
    metric: &'static str,
    #[serde(flatten)]
    stats: JsonStats,
}

#[derive(Serialize)]
struct JsonSimulation<'a> {
    simulation: usize,
    final_equity: JsonFloat,
    total_return: JsonFloat,
    max_drawdown: JsonFloat,
    sharpe_ratio: JsonFloat,
    profit_factor: JsonFloat,
    volatility: JsonFloat,
    average_return: JsonFloat,
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<&'a EquityCurve>,
}

impl<'a> JsonSimulation<'a> {
    fn new(index: usize, curve: &'a EquityCurve, m: &Metrics, include_curve: bool) -> Self {
        Self {
            simulation: index + 1,
            final_equity: JsonFloat(curve.final_equity()),
            total_return: JsonFloat(m.total_return),
            max_drawdown: JsonFloat(m.max_drawdown),
            sharpe_ratio: JsonFloat(m.sharpe_ratio),
            profit_factor: JsonFloat(m.profit_factor),
            volatility: JsonFloat(m.volatility),
            average_return: JsonFloat(m.average_return),
            curve: include_curve.then_some(curve),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    parameters: &'a ParameterSet,
    summary: Vec<JsonSummaryRow>,
    simulations: Vec<JsonSimulation<'a>>,
}

/// Serializes the report as pretty-printed JSON.
///
/// Curves are embedded only when `include_curves` is set; they dominate the
/// output size for long runs.
///
/// # Errors
///
/// Returns [`crate::ReportError::Json`] if serialization fails.
pub fn export_json(report: &Report<'_>, include_curves: bool) -> Result<String> {
    let batch = report.batch;
    let doc = JsonReport {
        generated_at: report.generated_at,
        seed: report.seed,
        parameters: report.params,
        summary: batch
            .report
            .entries()
            .into_iter()
            .map(|(metric, stats)| JsonSummaryRow {
                metric,
                stats: stats.into(),
            })
            .collect(),
        simulations: batch
            .curves
            .iter()
            .zip(&batch.metrics)
            .enumerate()
            .map(|(i, (curve, m))| JsonSimulation::new(i, curve, m, include_curves))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eqsim_domain::RawParameters;
    use eqsim_simulation::monte_carlo::run_batch;
    use eqsim_simulation::random::seeded;
    use serde_json::Value;

    #[test]
    fn test_json_float_non_finite() {
        assert_eq!(serde_json::to_string(&JsonFloat(1.5)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&JsonFloat(f64::NAN)).unwrap(), "\"NaN\"");
        assert_eq!(
            serde_json::to_string(&JsonFloat(f64::INFINITY)).unwrap(),
            "\"inf\""
        );
        assert_eq!(
            serde_json::to_string(&JsonFloat(f64::NEG_INFINITY)).unwrap(),
            "\"-inf\""
        );
    }

    #[test]
    fn test_json_report_structure() {
        let params = RawParameters::default()
            .with_num_trades(3)
            .with_num_simulations(2)
            .with_win_rate_pct(100.0)
            .into_parameters()
            .unwrap();
        let batch = run_batch(&params, &mut seeded(1)).unwrap();
        let report = Report::new(&params, &batch).with_seed(1);

        let value: Value = serde_json::from_str(&export_json(&report, true).unwrap()).unwrap();
        assert_eq!(value["seed"], 1);
        assert_eq!(value["parameters"]["num_trades"], 3);
        assert_eq!(value["parameters"]["risk_type"], "fixed");
        assert_eq!(value["summary"].as_array().map(Vec::len), Some(7));
        assert_eq!(value["summary"][4]["metric"], "Profit Factor");
        assert_eq!(value["summary"][4]["average"], "inf");

        let sims = value["simulations"].as_array().unwrap();
        assert_eq!(sims.len(), 2);
        assert_eq!(sims[0]["simulation"], 1);
        assert_eq!(sims[0]["curve"].as_array().map(Vec::len), Some(4));

        let without: Value =
            serde_json::from_str(&export_json(&report, false).unwrap()).unwrap();
        assert!(without["simulations"][0].get("curve").is_none());
    }
}
