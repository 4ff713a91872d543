pub mod equity_curve;
pub mod parameters;

pub use equity_curve::EquityCurve;
pub use parameters::{ParameterSet, RawParameters};
