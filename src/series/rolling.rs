//! Trailing moving average over daily observations.

use super::TimeSeriesPoint;

/// Default smoothing window, in observations.
pub const DEFAULT_WINDOW: usize = 90;

/// Compute a trailing mean over `window` points.
///
/// Each output point carries the date of the last observation in its window,
/// so the result has `len - window + 1` points. Series shorter than the window
/// (and a window of zero) are returned unchanged.
///
/// The running sum is recomputed from the window itself every `window` steps,
/// so rounding left behind by a large value never outlasts one window.
pub fn trailing_mean(points: Vec<TimeSeriesPoint>, window: usize) -> Vec<TimeSeriesPoint> {
    if window == 0 || points.len() < window {
        return points;
    }

    let size = window as f64;
    let mut sum: f64 = points[..window].iter().map(|p| p.value).sum();
    let mut out = Vec::with_capacity(points.len() - window + 1);
    out.push(TimeSeriesPoint::new(points[window - 1].date, sum / size));

    for i in window..points.len() {
        if i % window == 0 {
            sum = points[i + 1 - window..=i].iter().map(|p| p.value).sum();
        } else {
            sum += points[i].value - points[i - window].value;
        }
        out.push(TimeSeriesPoint::new(points[i].date, sum / size));
    }
    out
}
