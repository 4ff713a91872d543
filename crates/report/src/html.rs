//! Standalone HTML report.

use crate::Report;
use crate::chart::render_svg;
use crate::format::{format_value, parameter_rows};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
table { border-collapse: collapse; width: 100%; margin: 20px 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f5f5f5; }
.chart-container { margin: 20px 0; max-width: 1000px; }
.stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 20px 0; }
.stat-card { border: 1px solid #ddd; padding: 15px; border-radius: 4px; }
.stat-card h3 { margin-top: 0; }
";

/// Renders the full report as an HTML document.
#[must_use]
pub fn export_html(report: &Report<'_>) -> String {
    let seed = report
        .seed
        .map(|seed| format!(" &middot; seed {seed}"))
        .unwrap_or_default();
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Equity Curve Simulation Report</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <h1>Equity Curve Simulation Report</h1>\n<p>Generated {}{seed}</p>\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    html.push_str("<h2>Parameters</h2>\n<table>\n<tr><th>Parameter</th><th>Value</th></tr>\n");
    for (name, value) in parameter_rows(report.params) {
        html.push_str(&format!("<tr><td>{name}</td><td>{value}</td></tr>\n"));
    }
    html.push_str("</table>\n");

    html.push_str("<h2>Equity Curves</h2>\n<div class=\"chart-container\">\n");
    html.push_str(&render_svg(&report.batch.curves));
    html.push_str("\n</div>\n");

    html.push_str("<h2>Summary Statistics</h2>\n<div class=\"stats-grid\">\n");
    for (label, stats) in report.batch.report.entries() {
        html.push_str(&format!(
            "<div class=\"stat-card\"><h3>{label}</h3>\
             <div>Avg: {}<br>Min: {}<br>Max: {}</div></div>\n",
            format_value(stats.average),
            format_value(stats.minimum),
            format_value(stats.maximum)
        ));
    }
    html.push_str("</div>\n");

    html.push_str(
        "<h2>Detailed Results</h2>\n<table>\n<tr><th>Simulation</th><th>Final Equity</th>\
         <th>Total Return (%)</th><th>Max Drawdown (%)</th><th>Sharpe Ratio</th>\
         <th>Profit Factor</th><th>Volatility (%)</th><th>Average Return (%)</th></tr>\n",
    );
    for (index, (curve, m)) in report
        .batch
        .curves
        .iter()
        .zip(&report.batch.metrics)
        .enumerate()
    {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            index + 1,
            format_value(curve.final_equity()),
            format_value(m.total_return),
            format_value(m.max_drawdown),
            format_value(m.sharpe_ratio),
            format_value(m.profit_factor),
            format_value(m.volatility),
            format_value(m.average_return)
        ));
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use eqsim_domain::RawParameters;
    use eqsim_simulation::monte_carlo::run_batch;
    use eqsim_simulation::random::seeded;

    #[test]
    fn test_html_report_sections() {
        let params = RawParameters::default()
            .with_num_trades(10)
            .with_num_simulations(3)
            .into_parameters()
            .unwrap();
        let batch = run_batch(&params, &mut seeded(4)).unwrap();
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let report = Report::new(&params, &batch)
            .with_seed(4)
            .with_generated_at(generated_at);

        let html = export_html(&report);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Generated 2024-05-01 12:00:00 UTC &middot; seed 4"));
        assert!(html.contains("<td>Win Rate</td><td>50.0%</td>"));
        assert_eq!(html.matches("class=\"stat-card\"").count(), 7);
        assert_eq!(html.matches("<polyline").count(), 3);
        assert!(html.contains("<tr><td>3</td>"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
