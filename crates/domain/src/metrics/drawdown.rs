//! Running-peak drawdown.

/// Maximum percentage decline from the running peak, scanning left to right.
///
/// The peak starts at the first point. Returns `0.0` for a curve that never
/// falls below a previous high.
#[must_use]
pub fn max_drawdown_pct(equity: &[f64]) -> f64 {
    let Some((&first, rest)) = equity.split_first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_drawdown = 0.0_f64;
    for &value in rest {
        if value > peak {
            peak = value;
        }
        let drawdown = (peak - value) / peak * 100.0;
        max_drawdown = max_drawdown.max(drawdown);
    }
    max_drawdown
}
