//! CSV row parsing into typed time-series points.

use chrono::{DateTime, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::series::TimeSeriesPoint;

/// Unix timestamps above this are taken to be in milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Column arrangement of a metric export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnLayout {
    /// `date,value`
    #[default]
    DateValue,
    /// `timestamp,date,value`
    TimestampDateValue,
    /// `timestamp,date,value_1,...,value_n`, summed into one value.
    Summed,
}

/// Parse CSV text into points, skipping the header and any malformed rows.
///
/// Rows are returned in source order; callers sort when they need
/// chronological order.
pub fn parse_rows(text: &str, layout: ColumnLayout) -> Vec<TimeSeriesPoint> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                debug!(%err, "skipping unreadable row");
                skipped += 1;
                continue;
            }
        };
        match parse_record(&record, layout) {
            Some(point) => points.push(point),
            None => {
                debug!(row = ?record, "skipping malformed row");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        debug!(kept = points.len(), skipped, "parsed csv rows");
    }
    points
}

fn parse_record(record: &StringRecord, layout: ColumnLayout) -> Option<TimeSeriesPoint> {
    match layout {
        ColumnLayout::DateValue => {
            let date = parse_date(record.get(0)?)?;
            let value = clean_value(record.get(1)?)?;
            Some(TimeSeriesPoint::new(date, value))
        }
        ColumnLayout::TimestampDateValue => {
            let date = record_date(record)?;
            let value = clean_value(record.get(2)?)?;
            Some(TimeSeriesPoint::new(date, value))
        }
        ColumnLayout::Summed => {
            let date = record_date(record)?;
            let mut total = None;
            for cell in record.iter().skip(2) {
                if cell.trim_matches(|c: char| c == '"' || c.is_whitespace()).is_empty() {
                    continue;
                }
                let value = clean_value(cell)?;
                total = Some(total.unwrap_or(0.0) + value);
            }
            total.map(|value| TimeSeriesPoint::new(date, value))
        }
    }
}

/// Human date column first, falling back to the leading timestamp.
fn record_date(record: &StringRecord) -> Option<NaiveDate> {
    record
        .get(1)
        .and_then(parse_date)
        .or_else(|| record.get(0).and_then(parse_date))
}

/// Strip currency formatting and parse a finite number.
pub fn clean_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '"' | '\''))
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse the date forms found in metric exports.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim().trim_matches('"').trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(prefix) = s.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(date);
    }
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        let n: i64 = s.parse().ok()?;
        let secs = if n > MILLIS_THRESHOLD { n / 1000 } else { n };
        return DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive());
    }
    None
}
