//! Display units for metric magnitudes.

use serde::{Deserialize, Serialize};

/// Scale applied to raw values before charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Raw,
    Thousands,
    Millions,
    Billions,
}

impl Unit {
    pub fn divisor(self) -> f64 {
        match self {
            Self::Raw => 1.0,
            Self::Thousands => 1e3,
            Self::Millions => 1e6,
            Self::Billions => 1e9,
        }
    }

    /// Short suffix for tick labels (`K`, `M`, `B`).
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Raw => "",
            Self::Thousands => "K",
            Self::Millions => "M",
            Self::Billions => "B",
        }
    }

    pub fn scale(self, value: f64) -> f64 {
        value / self.divisor()
    }

    pub fn scale_all(self, values: impl IntoIterator<Item = f64>) -> Vec<f64> {
        values.into_iter().map(|v| self.scale(v)).collect()
    }
}
