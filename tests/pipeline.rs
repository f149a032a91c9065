use std::{fs, path::Path};

use chain_compare::{
    data::{
        parse::ColumnLayout,
        source::{CsvSource, DirSource, HttpSource},
    },
    pipeline::{
        self,
        catalog::{Catalog, MetricSpec},
        PipelineDefaults, Runner,
    },
    series::{units::Unit, Entity},
};
use chrono::{Duration, NaiveDate};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn defaults() -> PipelineDefaults {
    PipelineDefaults {
        cutoff: day(2024, 7, 1),
        window: 90,
    }
}

fn write(root: &Path, name: &str, body: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn daily_csv(start: NaiveDate, days: i64, value: f64) -> String {
    let mut body = String::from("date,value\n");
    for i in 0..days {
        body.push_str(&format!("{},{}\n", start + Duration::days(i), value));
    }
    body
}

#[test]
fn prepare_sorts_filters_and_keeps_raw_values() {
    let spec = MetricSpec::new("rev", "Revenue", "a.csv", "b.csv");
    let text = "date,value\n2024-07-02,200\n2024-06-30,50\n2024-07-01,100\n";
    let points = pipeline::prepare(text, &spec, defaults());
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![100.0, 200.0]);
}

#[test]
fn smoothing_happens_after_cutoff() {
    let spec = MetricSpec::new("tx", "Transactions", "a.csv", "b.csv").smoothed();
    let mut text = daily_csv(day(2024, 6, 1), 30, 1000.0);
    text.push_str(&daily_csv(day(2024, 7, 1), 91, 10.0).replacen("date,value\n", "", 1));
    let points = pipeline::prepare(&text, &spec, defaults());
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(|p| p.value == 10.0));
}

#[test]
fn repeated_dates_collapse_to_last_row_before_smoothing() {
    let mut spec = MetricSpec::new("tx", "Transactions", "a.csv", "b.csv").smoothed();
    spec.window = Some(2);
    let text = "date,value\n2024-07-01,1\n2024-07-02,2\n2024-07-02,3\n2024-07-03,4\n";
    let points = pipeline::prepare(text, &spec, defaults());
    let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(dates, vec![day(2024, 7, 2), day(2024, 7, 3)]);
    assert_eq!(values, vec![2.0, 3.5]);
}

#[test]
fn metric_overrides_beat_defaults() {
    let mut spec = MetricSpec::new("tx", "Transactions", "a.csv", "b.csv").smoothed();
    spec.window = Some(2);
    spec.cutoff = Some(day(2024, 1, 1));
    let text = "date,value\n2024-01-01,1\n2024-01-02,3\n2024-01-03,5\n";
    let points = pipeline::prepare(text, &spec, defaults());
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![2.0, 4.0]);
}

#[tokio::test]
async fn dir_source_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let source = DirSource::new(dir.path());
    let err = source.fetch("nope.csv").await.unwrap_err();
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn http_source_encodes_segments() {
    let source = HttpSource::new("https://example.com/data/").unwrap();
    assert_eq!(
        source.url_for("REV Charts/Solana REV.csv"),
        "https://example.com/data/REV%20Charts/Solana%20REV.csv"
    );
}

#[tokio::test]
async fn run_metric_loads_both_entities() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "DEX/sol.csv",
        "timestamp,day,a,b\n1719792000,2024-07-01,\"$1,000,000\",500000\n",
    );
    write(
        dir.path(),
        "DEX/eth.csv",
        "timestamp,day,a,b\n1719792000,2024-07-01,2000000,1000000\n",
    );
    let spec = MetricSpec::new("dex", "DEX Volume", "DEX/sol.csv", "DEX/eth.csv")
        .layout(ColumnLayout::Summed)
        .unit(Unit::Millions)
        .shared_scale()
        .comparison();

    let report = pipeline::run_metric(&spec, &DirSource::new(dir.path()), defaults()).await;
    assert_eq!(report.charts.len(), 3);
    assert_eq!(report.series[&Entity::Solana][0].value, 1_500_000.0);
    assert_eq!(report.series[&Entity::Ethereum][0].value, 3_000_000.0);
    assert_eq!(report.charts[0].data.datasets[0].data, vec![1.5]);
    assert_eq!(report.charts[0].options.scales.y.max, Some(4.0));
}

#[tokio::test]
async fn failing_metric_does_not_affect_others() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ok/sol.csv", "date,value\n2024-07-01,1\n");
    write(dir.path(), "ok/eth.csv", "date,value\n2024-07-01,2\n");
    write(dir.path(), "half/sol.csv", "date,value\n2024-07-01,1\n");

    let catalog = Catalog {
        metrics: vec![
            MetricSpec::new("broken", "Broken", "half/sol.csv", "half/eth.csv"),
            MetricSpec::new("ok", "Ok", "ok/sol.csv", "ok/eth.csv"),
        ],
    };
    let runner = Runner::new(catalog, DirSource::new(dir.path()), defaults());

    let reports = runner.run_all().await;
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].id, "broken");
    assert!(reports[0].is_empty());
    assert!(reports[0].series.is_empty());
    assert_eq!(reports[1].id, "ok");
    assert_eq!(reports[1].charts.len(), 2);

    assert!(runner.run_one("missing").await.is_none());
    let dashboard = runner.dashboard().await;
    assert_eq!(dashboard.metrics.len(), 2);
    assert!(!dashboard.generated_at.is_empty());
}
