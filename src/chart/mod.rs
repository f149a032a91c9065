//! Chart assembly: labels, scaled values and options for the rendering sink.

pub mod options;
pub mod scale;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    pipeline::catalog::MetricSpec,
    series::{labels, units::Unit, Entity, TimeSeriesPoint, TimeSeriesSet},
};

pub use options::{ChartOptions, TickFormat};

/// Chart type understood by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

/// Everything the sink needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

impl Dataset {
    fn styled(kind: ChartKind, entity: Entity, label: String, data: Vec<f64>) -> Self {
        let (fill, tension, point_radius, border_width) = match kind {
            ChartKind::Line => (true, Some(0.4), Some(1.0), None),
            ChartKind::Bar => (false, None, None, Some(1.0)),
        };
        Self {
            label,
            data,
            border_color: entity.color().to_string(),
            background_color: entity.color_light().to_string(),
            fill,
            tension,
            point_radius,
            border_width,
        }
    }
}

/// Labels and scaled values as two parallel sequences of equal length.
pub fn axis_data(points: &[TimeSeriesPoint], unit: Unit) -> (Vec<String>, Vec<f64>) {
    let labels = labels::year_anchored(points.iter().map(|p| p.date));
    let values = unit.scale_all(points.iter().map(|p| p.value));
    (labels, values)
}

/// Points of `a` and `b` on the dates both series cover, in `a`'s order.
pub fn align(a: &[TimeSeriesPoint], b: &[TimeSeriesPoint]) -> (Vec<NaiveDate>, Vec<f64>, Vec<f64>) {
    let lookup: HashMap<NaiveDate, f64> = b.iter().map(|p| (p.date, p.value)).collect();
    let mut dates = Vec::new();
    let mut left = Vec::new();
    let mut right = Vec::new();
    for point in a {
        if let Some(value) = lookup.get(&point.date) {
            dates.push(point.date);
            left.push(point.value);
            right.push(*value);
        }
    }
    (dates, left, right)
}

/// Build the per-entity charts (and the combined chart when requested).
pub fn assemble(spec: &MetricSpec, set: &TimeSeriesSet) -> Vec<ChartSpec> {
    let prepared: Vec<(Entity, Vec<String>, Vec<f64>)> = Entity::ALL
        .iter()
        .map(|&entity| {
            let points = set.get(&entity).map(Vec::as_slice).unwrap_or(&[]);
            let (labels, values) = axis_data(points, spec.unit);
            (entity, labels, values)
        })
        .collect();

    let ceiling = if spec.shared_scale || spec.comparison {
        scale::shared_ceiling(prepared.iter().map(|(_, _, values)| values.as_slice()))
    } else {
        None
    };

    let mut charts: Vec<ChartSpec> = prepared
        .into_iter()
        .map(|(entity, labels, values)| ChartSpec {
            id: format!("{}-{}", spec.id, entity.slug()),
            kind: spec.kind,
            data: ChartData {
                labels,
                datasets: vec![Dataset::styled(
                    spec.kind,
                    entity,
                    spec.dataset_label.clone(),
                    values,
                )],
            },
            options: metric_options(spec, format!("{entity} - {}", spec.title))
                .with_y_max(if spec.shared_scale { ceiling } else { None }),
        })
        .collect();

    if spec.comparison {
        charts.push(comparison_chart(spec, set, ceiling));
    }
    charts
}

fn comparison_chart(spec: &MetricSpec, set: &TimeSeriesSet, ceiling: Option<f64>) -> ChartSpec {
    let solana = set.get(&Entity::Solana).map(Vec::as_slice).unwrap_or(&[]);
    let ethereum = set.get(&Entity::Ethereum).map(Vec::as_slice).unwrap_or(&[]);
    let (dates, left, right) = align(solana, ethereum);

    let datasets = [(Entity::Solana, left), (Entity::Ethereum, right)]
        .into_iter()
        .map(|(entity, values)| {
            let label = match spec.unit.suffix() {
                "" => entity.display_name().to_string(),
                suffix => format!("{entity} ({}{suffix})", spec.ticks.prefix),
            };
            Dataset::styled(spec.kind, entity, label, spec.unit.scale_all(values))
        })
        .collect();

    ChartSpec {
        id: format!("{}-comparison", spec.id),
        kind: spec.kind,
        data: ChartData {
            labels: labels::year_anchored(dates),
            datasets,
        },
        options: metric_options(spec, format!("{} Comparison", spec.title)).with_y_max(ceiling),
    }
}

fn metric_options(spec: &MetricSpec, title: String) -> ChartOptions {
    ChartOptions::base()
        .with_title(title)
        .with_x_title("Date")
        .with_y_axis(spec.axis_title.clone(), spec.ticks.clone())
}
