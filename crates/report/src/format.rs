//! Number formatting shared by every renderer.

use eqsim_domain::ParameterSet;

/// Formats a value with two decimals, spelling out non-finite values.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "∞".to_string()
    } else if value == f64::NEG_INFINITY {
        "-∞".to_string()
    } else if value == 0.0 {
        // avoid "-0.00"
        "0.00".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Formats a fraction as a percentage with one decimal.
#[must_use]
pub fn format_fraction_pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Display rows for every parameter, in input-form order.
#[must_use]
pub fn parameter_rows(params: &ParameterSet) -> Vec<(&'static str, String)> {
    vec![
        ("Starting Equity", format!("{:.2}", params.starting_equity())),
        ("Number of Trades", params.num_trades().to_string()),
        ("Number of Simulations", params.num_simulations().to_string()),
        ("Win Rate", format_fraction_pct(params.win_rate())),
        ("Reward/Risk Ratio", params.reward_risk().to_string()),
        ("Risk Type", params.risk_type().to_string()),
        ("Risk Size", format_fraction_pct(params.risk_size())),
        (
            "Use Martingale",
            (if params.use_martingale() { "Yes" } else { "No" }).to_string(),
        ),
        (
            "Martingale Multiplier",
            params.martingale_multiplier().to_string(),
        ),
        ("Martingale Reset", params.martingale_reset().to_string()),
    ]
}
