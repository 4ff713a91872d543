use eqsim_domain::{AggregateError, ValidationError};
use thiserror::Error;

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors raised while running a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Parameters failed validation; nothing was simulated.
    #[error("invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    /// Batch aggregation failed.
    #[error("aggregation failed: {0}")]
    Aggregate(#[from] AggregateError),

    /// The cancellation token fired before the batch finished.
    #[error("simulation cancelled after {completed} of {requested} runs")]
    Cancelled { completed: usize, requested: usize },
}
