//! The per-metric pipeline: fetch, parse, sort, filter, smooth, chart.

pub mod catalog;

use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::{
    chart::{self, ChartSpec},
    data::{
        parse,
        source::{CsvSource, SourceError},
    },
    series::{self, filter, rolling, Entity, TimeSeriesPoint, TimeSeriesSet},
};

use catalog::{Catalog, MetricSpec};

/// Settings every metric falls back to when its spec has no override.
#[derive(Debug, Clone, Copy)]
pub struct PipelineDefaults {
    pub cutoff: NaiveDate,
    pub window: usize,
}

/// Outcome of one metric load. `charts` is empty when the load failed.
#[derive(Debug, Clone, Serialize)]
pub struct MetricReport {
    pub id: String,
    pub title: String,
    #[serde(skip)]
    pub series: TimeSeriesSet,
    pub charts: Vec<ChartSpec>,
}

impl MetricReport {
    fn empty(spec: &MetricSpec) -> Self {
        Self {
            id: spec.id.clone(),
            title: spec.title.clone(),
            series: TimeSeriesSet::new(),
            charts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// Every metric of a catalog, stamped with the time it was prepared.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at: String,
    pub metrics: Vec<MetricReport>,
}

/// Turn one CSV export into a chart-ready series.
pub fn prepare(text: &str, spec: &MetricSpec, defaults: PipelineDefaults) -> Vec<TimeSeriesPoint> {
    let mut points = parse::parse_rows(text, spec.layout);
    series::sort_by_date(&mut points);
    series::dedup_dates(&mut points);
    let points = filter::since(points, spec.effective_cutoff(defaults.cutoff));
    match spec.effective_window(defaults.window) {
        Some(window) => rolling::trailing_mean(points, window),
        None => points,
    }
}

/// Fetch both entities concurrently and prepare their series.
pub async fn load_series<S: CsvSource>(
    spec: &MetricSpec,
    source: &S,
    defaults: PipelineDefaults,
) -> Result<TimeSeriesSet, SourceError> {
    let (solana, ethereum) = tokio::try_join!(
        source.fetch(spec.resources.get(Entity::Solana)),
        source.fetch(spec.resources.get(Entity::Ethereum))
    )?;

    let mut set = TimeSeriesSet::new();
    for (entity, text) in [(Entity::Solana, solana), (Entity::Ethereum, ethereum)] {
        set.insert(entity, prepare(&text, spec, defaults));
    }
    Ok(set)
}

/// Load and chart one metric. Failures are logged and yield an empty report.
#[instrument(skip_all, fields(metric = %spec.id))]
pub async fn run_metric<S: CsvSource>(
    spec: &MetricSpec,
    source: &S,
    defaults: PipelineDefaults,
) -> MetricReport {
    match load_series(spec, source, defaults).await {
        Ok(series) => {
            let charts = chart::assemble(spec, &series);
            info!(
                solana = series.get(&Entity::Solana).map_or(0, Vec::len),
                ethereum = series.get(&Entity::Ethereum).map_or(0, Vec::len),
                charts = charts.len(),
                "metric prepared"
            );
            MetricReport {
                id: spec.id.clone(),
                title: spec.title.clone(),
                series,
                charts,
            }
        }
        Err(err) => {
            error!(%err, "failed to load metric");
            MetricReport::empty(spec)
        }
    }
}

/// Catalog, source and defaults bundled for repeated loads.
#[derive(Debug, Clone)]
pub struct Runner<S> {
    pub catalog: Catalog,
    pub source: S,
    pub defaults: PipelineDefaults,
}

impl<S: CsvSource> Runner<S> {
    pub fn new(catalog: Catalog, source: S, defaults: PipelineDefaults) -> Self {
        Self {
            catalog,
            source,
            defaults,
        }
    }

    /// Run every metric concurrently; one failing metric never affects another.
    pub async fn run_all(&self) -> Vec<MetricReport> {
        join_all(
            self.catalog
                .metrics
                .iter()
                .map(|spec| run_metric(spec, &self.source, self.defaults)),
        )
        .await
    }

    /// Run a single metric by id, `None` for an unknown id.
    pub async fn run_one(&self, id: &str) -> Option<MetricReport> {
        let spec = self.catalog.get(id)?;
        Some(run_metric(spec, &self.source, self.defaults).await)
    }

    pub async fn dashboard(&self) -> Dashboard {
        let metrics = self.run_all().await;
        Dashboard {
            generated_at: Utc::now().to_rfc3339(),
            metrics,
        }
    }
}
