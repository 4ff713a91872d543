//! Domain model for the equity curve simulator.
//!
//! This crate holds the pure, side-effect free parts of the system:
//! - Validated simulation parameters
//! - Equity curves
//! - Per-curve performance metrics
//! - Batch aggregation across curves

/// Enumerations shared across the domain.
pub mod enums;
/// Domain error types.
pub mod error;
/// Performance metrics and aggregation.
pub mod metrics;
/// Value objects (parameters, curves).
pub mod value_objects;

pub use enums::RiskType;
pub use error::{AggregateError, ValidationError};
pub use metrics::aggregate::{AggregateReport, SummaryStats, aggregate};
pub use metrics::{Metrics, compute_metrics};
pub use value_objects::equity_curve::EquityCurve;
pub use value_objects::parameters::{ParameterSet, RawParameters};
