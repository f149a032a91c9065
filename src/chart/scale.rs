//! Shared value-axis ceiling for charts compared side by side.

/// Headroom above the tallest point.
pub const PADDING: f64 = 1.1;

/// `ceil(max × 1.1)` over every value of every series, `None` when all are empty.
pub fn shared_ceiling<'a, I>(series: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    series
        .into_iter()
        .flat_map(|values| values.iter().copied())
        .reduce(f64::max)
        .map(|max| (max * PADDING).ceil())
}
