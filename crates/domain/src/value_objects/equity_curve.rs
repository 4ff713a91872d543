use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Account value after each simulated trade; index 0 is the starting equity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct EquityCurve {
    points: Vec<f64>,
}

impl EquityCurve {
    /// Creates a curve from its points.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCurve`] when `points` is empty.
    pub fn new(points: Vec<f64>) -> Result<Self, ValidationError> {
        if points.is_empty() {
            return Err(ValidationError::EmptyCurve);
        }
        Ok(Self { points })
    }

    /// Creates a curve from the starting equity and the equity after each trade.
    #[must_use]
    pub fn from_trades(starting_equity: f64, after_trades: impl IntoIterator<Item = f64>) -> Self {
        let mut points = vec![starting_equity];
        points.extend(after_trades);
        Self { points }
    }

    /// All equity points in trade order.
    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of points (trades + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a curve holds at least its starting point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of trades applied.
    #[must_use]
    pub fn num_trades(&self) -> usize {
        self.points.len() - 1
    }

    /// Equity before the first trade.
    #[must_use]
    pub fn starting_equity(&self) -> f64 {
        self.points[0]
    }

    /// Equity after the last trade.
    #[must_use]
    pub fn final_equity(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Simple per-trade returns, `(e[i] - e[i-1]) / e[i-1]`.
    #[must_use]
    pub fn returns(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|w| (w[1] - w[0]) / w[0])
            .collect()
    }
}

impl TryFrom<Vec<f64>> for EquityCurve {
    type Error = ValidationError;

    fn try_from(points: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<EquityCurve> for Vec<f64> {
    fn from(curve: EquityCurve) -> Self {
        curve.points
    }
}
