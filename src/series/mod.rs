//! Time-series primitives and the pure transforms applied to them.

pub mod filter;
pub mod labels;
pub mod rolling;
pub mod units;

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The two chains every dashboard compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Solana,
    Ethereum,
}

impl Entity {
    pub const ALL: [Entity; 2] = [Entity::Solana, Entity::Ethereum];

    /// Display name used in chart titles and legends.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Solana => "Solana",
            Self::Ethereum => "Ethereum",
        }
    }

    /// Lowercase identifier used in file names.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Solana => "solana",
            Self::Ethereum => "ethereum",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Solana => "#9945ff",
            Self::Ethereum => "#627eea",
        }
    }

    pub fn color_light(self) -> &'static str {
        match self {
            Self::Solana => "rgba(153, 69, 255, 0.3)",
            Self::Ethereum => "rgba(98, 126, 234, 0.3)",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One observation of a metric on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Per-entity series for one metric, in entity insertion order.
pub type TimeSeriesSet = IndexMap<Entity, Vec<TimeSeriesPoint>>;

/// Stable ascending sort by date; equal dates keep their source order.
pub fn sort_by_date(points: &mut [TimeSeriesPoint]) {
    points.sort_by_key(|p| p.date);
}

/// Collapse runs of equal dates into one point, keeping the last row of each
/// run. Expects date-sorted input.
pub fn dedup_dates(points: &mut Vec<TimeSeriesPoint>) {
    points.dedup_by(|later, kept| {
        if later.date == kept.date {
            *kept = *later;
            true
        } else {
            false
        }
    });
}

/// Largest value of a series, `None` when empty.
pub fn max_value(points: &[TimeSeriesPoint]) -> Option<f64> {
    points.iter().map(|p| p.value).reduce(f64::max)
}
