//! Simulation parameters.
//!
//! [`RawParameters`] is what an input layer collects (a form, a JSON file,
//! command-line flags). It is unchecked and expresses win rate and risk size
//! in percent. [`ParameterSet`] is the validated, immutable configuration the
//! simulation consumes; the only way to obtain one is through validation.

use crate::enums::RiskType;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Upper bound on trades per curve.
pub const MAX_TRADES: u64 = 1_000_000;
/// Upper bound on curves per batch.
pub const MAX_SIMULATIONS: u64 = 100_000;

/// Unvalidated simulation inputs, percent-denominated where a user would type a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawParameters {
    /// Account value before the first trade.
    pub starting_equity: f64,
    /// Trades per simulated curve.
    pub num_trades: u64,
    /// Number of curves in the batch.
    pub num_simulations: u64,
    /// Win probability in percent (0-100).
    pub win_rate_pct: f64,
    /// Reward multiple per unit risked.
    pub reward_risk: f64,
    /// Risk sizing mode.
    pub risk_type: RiskType,
    /// Risked fraction of equity in percent (0-100].
    pub risk_size_pct: f64,
    /// Whether to scale risk up after consecutive losses.
    pub use_martingale: bool,
    /// Factor applied to the risk on every martingale step.
    pub martingale_multiplier: f64,
    /// Consecutive losses per martingale step.
    pub martingale_reset: u64,
}

impl Default for RawParameters {
    fn default() -> Self {
        Self {
            starting_equity: 10_000.0,
            num_trades: 100,
            num_simulations: 10,
            win_rate_pct: 50.0,
            reward_risk: 2.0,
            risk_type: RiskType::Fixed,
            risk_size_pct: 1.0,
            use_martingale: false,
            martingale_multiplier: 2.0,
            martingale_reset: 1,
        }
    }
}

impl RawParameters {
    #[must_use]
    pub fn with_starting_equity(mut self, equity: f64) -> Self {
        self.starting_equity = equity;
        self
    }
    #[must_use]
    pub fn with_num_trades(mut self, trades: u64) -> Self {
        self.num_trades = trades;
        self
    }
    #[must_use]
    pub fn with_num_simulations(mut self, simulations: u64) -> Self {
        self.num_simulations = simulations;
        self
    }
    #[must_use]
    pub fn with_win_rate_pct(mut self, pct: f64) -> Self {
        self.win_rate_pct = pct;
        self
    }
    #[must_use]
    pub fn with_reward_risk(mut self, ratio: f64) -> Self {
        self.reward_risk = ratio;
        self
    }
    #[must_use]
    pub fn with_risk_type(mut self, risk_type: RiskType) -> Self {
        self.risk_type = risk_type;
        self
    }
    #[must_use]
    pub fn with_risk_size_pct(mut self, pct: f64) -> Self {
        self.risk_size_pct = pct;
        self
    }
    #[must_use]
    pub fn with_martingale(mut self, multiplier: f64, reset: u64) -> Self {
        self.use_martingale = true;
        self.martingale_multiplier = multiplier;
        self.martingale_reset = reset;
        self
    }

    /// Validates the inputs and converts percentages to fractions.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered, in field order.
    pub fn into_parameters(self) -> Result<ParameterSet, ValidationError> {
        ParameterSet::try_from(self)
    }
}

/// Validated configuration for one simulation batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSet {
    starting_equity: f64,
    num_trades: usize,
    num_simulations: usize,
    win_rate: f64,
    reward_risk: f64,
    risk_type: RiskType,
    risk_size: f64,
    use_martingale: bool,
    martingale_multiplier: f64,
    martingale_reset: usize,
}

impl ParameterSet {
    /// Account value before the first trade.
    #[must_use]
    pub fn starting_equity(&self) -> f64 {
        self.starting_equity
    }

    #[must_use]
    pub fn num_trades(&self) -> usize {
        self.num_trades
    }

    #[must_use]
    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    /// Win probability as a fraction in `[0, 1]`.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        self.win_rate
    }

    #[must_use]
    pub fn reward_risk(&self) -> f64 {
        self.reward_risk
    }

    #[must_use]
    pub fn risk_type(&self) -> RiskType {
        self.risk_type
    }

    /// Risked fraction of equity in `(0, 1]`.
    #[must_use]
    pub fn risk_size(&self) -> f64 {
        self.risk_size
    }

    #[must_use]
    pub fn use_martingale(&self) -> bool {
        self.use_martingale
    }

    #[must_use]
    pub fn martingale_multiplier(&self) -> f64 {
        self.martingale_multiplier
    }

    #[must_use]
    pub fn martingale_reset(&self) -> usize {
        self.martingale_reset
    }

    /// Returns a copy with a different simulation count.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BelowMinimum`] when `simulations` is zero and
    /// [`ValidationError::AboveMaximum`] above [`MAX_SIMULATIONS`].
    pub fn with_num_simulations(&self, simulations: usize) -> Result<Self, ValidationError> {
        let simulations = bounded_count(
            "num_simulations",
            u64::try_from(simulations).unwrap_or(u64::MAX),
            MAX_SIMULATIONS,
        )?;
        Ok(Self {
            num_simulations: simulations,
            ..self.clone()
        })
    }
}

impl TryFrom<RawParameters> for ParameterSet {
    type Error = ValidationError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        let starting_equity = positive("starting_equity", raw.starting_equity)?;
        let num_trades = bounded_count("num_trades", raw.num_trades, MAX_TRADES)?;
        let num_simulations =
            bounded_count("num_simulations", raw.num_simulations, MAX_SIMULATIONS)?;

        let win_rate = finite("win_rate", raw.win_rate_pct)? / 100.0;
        if !(0.0..=1.0).contains(&win_rate) {
            return Err(ValidationError::OutOfRange {
                field: "win_rate",
                range: "[0, 100]%",
                value: raw.win_rate_pct,
            });
        }

        let reward_risk = positive("reward_risk", raw.reward_risk)?;

        let risk_size = finite("risk_size", raw.risk_size_pct)? / 100.0;
        if risk_size <= 0.0 || risk_size > 1.0 {
            return Err(ValidationError::OutOfRange {
                field: "risk_size",
                range: "(0, 100]%",
                value: raw.risk_size_pct,
            });
        }

        // Martingale fields are only checked when the rule is active.
        let (martingale_multiplier, martingale_reset) = if raw.use_martingale {
            (
                positive("martingale_multiplier", raw.martingale_multiplier)?,
                at_least_one("martingale_reset", raw.martingale_reset)?,
            )
        } else {
            (raw.martingale_multiplier, raw.martingale_reset as usize)
        };

        Ok(Self {
            starting_equity,
            num_trades,
            num_simulations,
            win_rate,
            reward_risk,
            risk_type: raw.risk_type,
            risk_size,
            use_martingale: raw.use_martingale,
            martingale_multiplier,
            martingale_reset,
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

fn bounded_count(field: &'static str, value: u64, max: u64) -> Result<usize, ValidationError> {
    let count = at_least_one(field, value)?;
    if value > max {
        return Err(ValidationError::AboveMaximum { field, max, value });
    }
    Ok(count)
}

fn at_least_one(field: &'static str, value: u64) -> Result<usize, ValidationError> {
    if value >= 1 {
        Ok(value as usize)
    } else {
        Err(ValidationError::BelowMinimum {
            field,
            min: 1,
            value,
        })
    }
}
