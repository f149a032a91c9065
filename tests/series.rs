use chain_compare::series::{
    dedup_dates, filter, labels, max_value, rolling, sort_by_date, units::Unit, TimeSeriesPoint,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily(start: NaiveDate, values: &[f64]) -> Vec<TimeSeriesPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| TimeSeriesPoint::new(start + Duration::days(i as i64), *v))
        .collect()
}

#[test]
fn cutoff_keeps_boundary_day() {
    let points = daily(day(2024, 6, 29), &[1.0, 2.0, 3.0, 4.0]);
    let kept = filter::since(points, day(2024, 7, 1));
    let values: Vec<f64> = kept.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![3.0, 4.0]);
}

#[test]
fn constant_series_smooths_to_same_value() {
    let points = daily(day(2024, 1, 1), &[10.0; 91]);
    let smoothed = rolling::trailing_mean(points, rolling::DEFAULT_WINDOW);
    assert_eq!(smoothed.len(), 2);
    assert!(smoothed.iter().all(|p| p.value == 10.0));
    assert_eq!(smoothed[0].date, day(2024, 1, 1) + Duration::days(89));
}

#[test]
fn short_series_passes_through() {
    let points = daily(day(2024, 1, 1), &[1.0, 5.0, 9.0]);
    assert_eq!(rolling::trailing_mean(points.clone(), 90), points);
}

#[test]
fn spec_example_scales_to_millions() {
    let points = filter::since(
        daily(day(2024, 7, 1), &[100.0, 200.0]),
        day(2024, 7, 1),
    );
    let scaled = Unit::Millions.scale_all(points.iter().map(|p| p.value));
    assert_eq!(points.len(), 2);
    assert!((scaled[0] - 0.0001).abs() < 1e-12);
    assert!((scaled[1] - 0.0002).abs() < 1e-12);
}

#[test]
fn unit_divisors() {
    assert_eq!(Unit::Raw.scale(5.0), 5.0);
    assert_eq!(Unit::Thousands.scale(5_000.0), 5.0);
    assert_eq!(Unit::Billions.scale(2.5e9), 2.5);
}

#[test]
fn year_is_shown_once_at_first_occurrence() {
    let dates = vec![
        day(2024, 12, 30),
        day(2024, 12, 31),
        day(2025, 1, 1),
        day(2025, 1, 2),
    ];
    let out = labels::year_anchored(dates);
    assert_eq!(out, vec!["Dec 30, 2024", "Dec 31", "Jan 1, 2025", "Jan 2"]);
}

#[test]
fn later_january_does_not_repeat_year() {
    let out = labels::year_anchored(vec![day(2025, 3, 1), day(2025, 1, 15)]);
    assert_eq!(out, vec!["Mar 1, 2025", "Jan 15"]);
}

#[test]
fn sort_is_stable_and_ascending() {
    let mut points = vec![
        TimeSeriesPoint::new(day(2024, 7, 3), 3.0),
        TimeSeriesPoint::new(day(2024, 7, 1), 1.0),
        TimeSeriesPoint::new(day(2024, 7, 3), 4.0),
    ];
    sort_by_date(&mut points);
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1.0, 3.0, 4.0]);
    assert_eq!(max_value(&points), Some(4.0));
    assert_eq!(max_value(&[]), None);
}

#[test]
fn dedup_keeps_last_of_each_date() {
    let mut points = vec![
        TimeSeriesPoint::new(day(2024, 7, 1), 1.0),
        TimeSeriesPoint::new(day(2024, 7, 1), 2.0),
        TimeSeriesPoint::new(day(2024, 7, 1), 3.0),
        TimeSeriesPoint::new(day(2024, 7, 2), 4.0),
    ];
    dedup_dates(&mut points);
    assert_eq!(
        points,
        vec![
            TimeSeriesPoint::new(day(2024, 7, 1), 3.0),
            TimeSeriesPoint::new(day(2024, 7, 2), 4.0),
        ]
    );
}

proptest! {
    #[test]
    fn filter_output_is_on_or_after_cutoff(
        values in prop::collection::vec(0.0f64..1e9, 0..200),
        offset in 0i64..250,
    ) {
        let start = day(2024, 1, 1);
        let cutoff = start + Duration::days(offset);
        let points = daily(start, &values);
        let kept = filter::since(points.clone(), cutoff);
        prop_assert!(kept.iter().all(|p| p.date >= cutoff));
        prop_assert_eq!(&points[points.len() - kept.len()..], kept.as_slice());
    }

    #[test]
    fn rolling_length_and_first_mean(
        values in prop::collection::vec(0.0f64..1e6, 0..150),
        window in 1usize..100,
    ) {
        let points = daily(day(2024, 1, 1), &values);
        let out = rolling::trailing_mean(points.clone(), window);
        if values.len() < window {
            prop_assert_eq!(out, points);
        } else {
            prop_assert_eq!(out.len(), values.len() - window + 1);
            let mean = values[..window].iter().sum::<f64>() / window as f64;
            prop_assert!((out[0].value - mean).abs() <= 1e-9 * mean.max(1.0));
            for (i, point) in out.iter().enumerate() {
                let naive = values[i..i + window].iter().sum::<f64>() / window as f64;
                prop_assert!((point.value - naive).abs() <= 1e-6 * naive.max(1.0));
                prop_assert_eq!(point.date, points[i + window - 1].date);
            }
        }
    }

    #[test]
    fn each_year_labelled_exactly_once(offsets in prop::collection::vec(0i64..2000, 1..100)) {
        let mut dates: Vec<NaiveDate> = offsets
            .iter()
            .map(|o| day(2022, 1, 1) + Duration::days(*o))
            .collect();
        dates.sort();
        let out = labels::year_anchored(dates.clone());
        let mut years: Vec<i32> = dates.iter().map(chrono::Datelike::year).collect();
        years.dedup();
        for year in years {
            let tag = format!(", {year}");
            let hits: Vec<usize> = out
                .iter()
                .enumerate()
                .filter(|(_, l)| l.ends_with(&tag))
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(hits.len(), 1);
            let first = dates.iter().position(|d| chrono::Datelike::year(d) == year).unwrap();
            prop_assert_eq!(hits[0], first);
        }
    }
}
