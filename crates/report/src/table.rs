//! Terminal tables.

use crate::format::{format_value, parameter_rows};
use eqsim_domain::{AggregateReport, ParameterSet};
use eqsim_simulation::monte_carlo::BatchResult;
use prettytable::{Table, format, row};

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

/// Parameter / value table.
#[must_use]
pub fn render_parameters(params: &ParameterSet) -> Table {
    let mut table = new_table();
    table.set_titles(row!["Parameter", "Value"]);
    for (name, value) in parameter_rows(params) {
        table.add_row(row![name, value]);
    }
    table
}

/// Average, minimum and maximum of every metric.
#[must_use]
pub fn render_summary(report: &AggregateReport) -> Table {
    let mut table = new_table();
    table.set_titles(row!["Metric", "Average", "Minimum", "Maximum"]);
    for (label, stats) in report.entries() {
        table.add_row(row![
            label,
            r->format_value(stats.average),
            r->format_value(stats.minimum),
            r->format_value(stats.maximum)
        ]);
    }
    table
}

/// One row per simulation, numbered from 1.
#[must_use]
pub fn render_results(batch: &BatchResult) -> Table {
    let mut table = new_table();
    table.set_titles(row![
        "Simulation",
        "Final Equity",
        "Total Return (%)",
        "Max Drawdown (%)",
        "Sharpe Ratio",
        "Profit Factor",
        "Volatility (%)",
        "Average Return (%)"
    ]);
    for (index, (curve, m)) in batch.curves.iter().zip(&batch.metrics).enumerate() {
        table.add_row(row![
            r->index + 1,
            r->format_value(curve.final_equity()),
            r->format_value(m.total_return),
            r->format_value(m.max_drawdown),
            r->format_value(m.sharpe_ratio),
            r->format_value(m.profit_factor),
            r->format_value(m.volatility),
            r->format_value(m.average_return)
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use eqsim_domain::RawParameters;
    use eqsim_simulation::monte_carlo::run_batch;
    use eqsim_simulation::random::seeded;

    fn batch() -> (ParameterSet, BatchResult) {
        let params = RawParameters::default()
            .with_num_trades(3)
            .with_num_simulations(2)
            .with_win_rate_pct(100.0)
            .into_parameters()
            .unwrap();
        let batch = run_batch(&params, &mut seeded(1)).unwrap();
        (params, batch)
    }

    #[test]
    fn test_summary_table_lists_every_metric() {
        let (_, batch) = batch();
        let table = render_summary(&batch.report);
        assert_eq!(table.len(), 7);

        let text = table.to_string();
        assert!(text.contains("Final Equity"));
        assert!(text.contains("Average Return (%)"));
        // all-wins batch has no losing trades
        assert!(text.contains('∞'));
    }

    #[test]
    fn test_results_table_one_based() {
        let (_, batch) = batch();
        let table = render_results(&batch);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0][0].get_content(), "1");
        assert_eq!(table[1][0].get_content(), "2");
        assert_eq!(table[0][1].get_content(), "10612.08");
    }

    #[test]
    fn test_parameter_table() {
        let (params, _) = batch();
        let table = render_parameters(&params);
        assert_eq!(table.len(), 10);
        assert_eq!(table[2][1].get_content(), "2");
    }
}
