//! Monte Carlo simulation of trading equity curves.
//!
//! This crate provides:
//! - Injectable randomness sources
//! - A win/loss path generator with martingale risk sizing
//! - A batch engine with sequential and parallel modes
//! - Batch runs that score and aggregate every curve

/// Prelude module for convenient imports.
pub mod prelude;

/// Cooperative cancellation.
pub mod cancel;
/// Batch simulation engine.
pub mod engine;
/// Error types.
pub mod error;
/// Batch runs and aggregation.
pub mod monte_carlo;
/// Randomness sources.
pub mod random;
/// Equity path generation.
pub mod trade_path;
