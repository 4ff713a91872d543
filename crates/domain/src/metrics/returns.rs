//! Statistics over per-trade simple returns.

/// Trading days per year used to annualize the Sharpe ratio.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Arithmetic mean. `NaN` for an empty slice.
#[must_use]
pub fn mean(returns: &[f64]) -> f64 {
    returns.iter().sum::<f64>() / returns.len() as f64
}

/// Population standard deviation (divides by `n`). `NaN` for an empty slice.
#[must_use]
pub fn population_std_dev(returns: &[f64]) -> f64 {
    let mean = mean(returns);
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    variance.sqrt()
}

/// Annualized Sharpe ratio with a zero risk-free rate.
///
/// `NaN` when the returns have no dispersion (or there are none), since the
/// ratio is undefined there. Dispersion at rounding-noise level relative to
/// the mean counts as none.
#[must_use]
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    let mean = mean(returns);
    let std_dev = population_std_dev(returns);
    if std_dev.is_nan() || std_dev <= DISPERSION_EPSILON * mean.abs() {
        return f64::NAN;
    }
    mean / std_dev * TRADING_DAYS_PER_YEAR.sqrt()
}

// Identical returns computed from different equity levels differ by a few ulps.
const DISPERSION_EPSILON: f64 = 16.0 * f64::EPSILON;

/// Sum of gains over the absolute sum of losses.
///
/// `+inf` with gains and no losses, `NaN` with neither.
#[must_use]
pub fn profit_factor(returns: &[f64]) -> f64 {
    let gains = returns
        .iter()
        .filter(|r| **r > 0.0)
        .fold(0.0_f64, |acc, r| acc + r);
    let losses = returns
        .iter()
        .filter(|r| **r < 0.0)
        .fold(0.0_f64, |acc, r| acc + r)
        .abs();
    gains / losses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std_dev() {
        let returns = [0.1, -0.1, 0.2, 0.0];
        assert!((mean(&returns) - 0.05).abs() < 1e-12);
        // deviations: 0.05, -0.15, 0.15, -0.05 -> squares sum 0.05 -> /4 = 0.0125
        assert!((population_std_dev(&returns) - 0.0125_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_returns_are_nan() {
        assert!(mean(&[]).is_nan());
        assert!(population_std_dev(&[]).is_nan());
        assert!(sharpe_ratio(&[]).is_nan());
        assert!(profit_factor(&[]).is_nan());
    }

    #[test]
    fn test_sharpe_ratio_annualized() {
        let returns = [0.02, 0.0];
        // mean 0.01, std 0.01
        let expected = 252.0_f64.sqrt();
        assert!((sharpe_ratio(&returns) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sharpe_ratio_nan_without_dispersion() {
        assert!(sharpe_ratio(&[0.01, 0.01, 0.01]).is_nan());
        assert!(sharpe_ratio(&[-0.1]).is_nan());
        assert!(sharpe_ratio(&[0.0, 0.0]).is_nan());
    }

    #[test]
    fn test_sharpe_ratio_nan_for_rounding_noise() {
        // 10404 / 10200 - 1 and 10200 / 10000 - 1 differ in the last bits
        let returns = [0.02, 0.020_000_000_000_000_018, 0.019_999_999_999_999_997];
        assert!(population_std_dev(&returns) > 0.0);
        assert!(sharpe_ratio(&returns).is_nan());
    }

    #[test]
    fn test_profit_factor() {
        assert!((profit_factor(&[0.2, -0.1, 0.1, -0.1]) - 1.5).abs() < 1e-12);
        assert_eq!(profit_factor(&[0.1, 0.2]), f64::INFINITY);
        assert_eq!(profit_factor(&[-0.1]), 0.0);
        assert!(profit_factor(&[0.0, 0.0]).is_nan());
    }
}
