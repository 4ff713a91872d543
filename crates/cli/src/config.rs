//! Parameter layering for the command line.
//!
//! Precedence, lowest first: built-in defaults, the JSON parameter file,
//! then flags (each of which can also come from an `EQSIM_*` variable).

use anyhow::{Context, Result};
use clap::Args;
use eqsim_domain::{RawParameters, RiskType};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Simulation parameters accepted on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    /// JSON file with simulation parameters
    #[arg(long = "params", env = "EQSIM_PARAMS")]
    pub params_file: Option<PathBuf>,

    /// Starting account equity
    #[arg(long, env = "EQSIM_STARTING_EQUITY")]
    pub starting_equity: Option<f64>,

    /// Trades per simulation
    #[arg(short = 't', long = "trades", env = "EQSIM_TRADES")]
    pub num_trades: Option<u64>,

    /// Number of simulations
    #[arg(short = 'n', long = "simulations", env = "EQSIM_SIMULATIONS")]
    pub num_simulations: Option<u64>,

    /// Win rate in percent (0-100)
    #[arg(short = 'w', long = "win-rate", env = "EQSIM_WIN_RATE")]
    pub win_rate_pct: Option<f64>,

    /// Reward/risk ratio
    #[arg(short = 'r', long, env = "EQSIM_REWARD_RISK")]
    pub reward_risk: Option<f64>,

    /// Risk sizing mode (fixed or compounding)
    #[arg(long, env = "EQSIM_RISK_TYPE")]
    pub risk_type: Option<RiskType>,

    /// Risk per trade in percent of equity
    #[arg(long = "risk-size", env = "EQSIM_RISK_SIZE")]
    pub risk_size_pct: Option<f64>,

    /// Enable martingale risk scaling after consecutive losses
    #[arg(long, env = "EQSIM_MARTINGALE")]
    pub martingale: bool,

    /// Martingale risk multiplier
    #[arg(long, env = "EQSIM_MARTINGALE_MULTIPLIER")]
    pub martingale_multiplier: Option<f64>,

    /// Consecutive losses per martingale step
    #[arg(long, env = "EQSIM_MARTINGALE_RESET")]
    pub martingale_reset: Option<u64>,
}

impl ParameterArgs {
    /// Resolves defaults, the parameter file and flags into raw parameters.
    pub fn resolve(&self) -> Result<RawParameters> {
        let base = match &self.params_file {
            Some(path) => load_params_file(path)?,
            None => RawParameters::default(),
        };
        Ok(self.apply(base))
    }

    /// Overlays explicitly set flags on `raw`.
    #[must_use]
    pub fn apply(&self, mut raw: RawParameters) -> RawParameters {
        if let Some(v) = self.starting_equity {
            raw.starting_equity = v;
        }
        if let Some(v) = self.num_trades {
            raw.num_trades = v;
        }
        if let Some(v) = self.num_simulations {
            raw.num_simulations = v;
        }
        if let Some(v) = self.win_rate_pct {
            raw.win_rate_pct = v;
        }
        if let Some(v) = self.reward_risk {
            raw.reward_risk = v;
        }
        if let Some(v) = self.risk_type {
            raw.risk_type = v;
        }
        if let Some(v) = self.risk_size_pct {
            raw.risk_size_pct = v;
        }
        if self.martingale {
            raw.use_martingale = true;
        }
        if let Some(v) = self.martingale_multiplier {
            raw.martingale_multiplier = v;
        }
        if let Some(v) = self.martingale_reset {
            raw.martingale_reset = v;
        }
        raw
    }
}

/// Reads a [`RawParameters`] JSON document; missing fields keep their defaults.
pub fn load_params_file(path: &Path) -> Result<RawParameters> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read parameter file {}", path.display()))?;
    let raw: RawParameters = serde_json::from_str(&text)
        .with_context(|| format!("invalid parameter file {}", path.display()))?;
    debug!(path = %path.display(), "loaded parameter file");
    Ok(raw)
}
