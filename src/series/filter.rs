//! Hard truncation of a series at a cutoff date.

use chrono::NaiveDate;

use super::TimeSeriesPoint;

/// Keep only points dated on or after `cutoff`, preserving order.
pub fn since(points: Vec<TimeSeriesPoint>, cutoff: NaiveDate) -> Vec<TimeSeriesPoint> {
    points.into_iter().filter(|p| p.date >= cutoff).collect()
}
