use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the risked amount is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskType {
    /// Risk a fraction of the current equity.
    #[default]
    Fixed,
    /// Risk a fraction of the starting equity until the first win re-bases it.
    Compounding,
}

impl RiskType {
    /// Returns the lowercase name used in reports and on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskType::Fixed => "fixed",
            RiskType::Compounding => "compounding",
        }
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(RiskType::Fixed),
            "compounding" => Ok(RiskType::Compounding),
            other => Err(format!("unknown risk type `{other}`")),
        }
    }
}
