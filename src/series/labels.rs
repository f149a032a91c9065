//! Axis labels that anchor each calendar year exactly once.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

const WITH_YEAR: &str = "%b %-d, %Y";
const WITHOUT_YEAR: &str = "%b %-d";

/// Format dates as axis labels, showing the year only on the first date seen
/// for that year.
pub fn year_anchored(dates: impl IntoIterator<Item = NaiveDate>) -> Vec<String> {
    let mut seen = HashSet::new();
    dates
        .into_iter()
        .map(|date| {
            if seen.insert(date.year()) {
                date.format(WITH_YEAR).to_string()
            } else {
                date.format(WITHOUT_YEAR).to_string()
            }
        })
        .collect()
}
