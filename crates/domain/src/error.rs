//! Error types for the domain crate.

use thiserror::Error;

/// A simulation parameter failed validation.
///
/// Every variant names the offending field so the input layer can point at it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A real-valued field was `NaN` or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// A field that must be strictly positive was not.
    #[error("{field} must be greater than 0, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// An integer field was below its minimum.
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: u64,
        value: u64,
    },

    #[error("{field} must be at most {max}, got {value}")]
    AboveMaximum {
        field: &'static str,
        max: u64,
        value: u64,
    },

    /// A field fell outside its allowed range.
    #[error("{field} must be within {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: f64,
    },

    /// An equity curve was constructed without any points.
    #[error("equity curve must contain at least one point")]
    EmptyCurve,
}

impl ValidationError {
    /// Returns the name of the field that failed validation, if any.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NotFinite { field, .. }
            | Self::NotPositive { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::OutOfRange { field, .. } => Some(field),
            Self::EmptyCurve => None,
        }
    }
}

/// Aggregation over a batch of curves failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateError {
    /// No curves were supplied.
    #[error("cannot aggregate an empty batch")]
    EmptyBatch,

    /// The metrics and final equity collections disagree in length.
    #[error("batch length mismatch: {metrics} metrics records, {final_equities} final equities")]
    LengthMismatch {
        metrics: usize,
        final_equities: usize,
    },
}
