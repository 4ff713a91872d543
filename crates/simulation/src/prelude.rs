//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use eqsim_simulation::prelude::*;
//! ```

// Cancellation
pub use crate::cancel::CancellationToken;

// Engine
pub use crate::engine::SimulationEngine;

// Errors
pub use crate::error::SimulationError;

// Monte Carlo
pub use crate::monte_carlo::{BatchResult, MonteCarloRunner, run_batch, summarize};

// Randomness
pub use crate::random::{RandomSource, ScriptedSource, seeded};

// Path generators
pub use crate::trade_path::{
    DeterministicPath, PathGenerator, TradeOutcome, TradePathGenerator, TradeRecord,
};

// Domain types most callers need alongside the engine
pub use eqsim_domain::{
    AggregateReport, EquityCurve, Metrics, ParameterSet, RawParameters, RiskType, SummaryStats,
    compute_metrics,
};
