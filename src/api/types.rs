//! Shared DTOs for JSON responses.

use serde::Serialize;

use crate::{
    chart::ChartKind,
    pipeline::catalog::{MetricSpec, Resources},
    series::units::Unit,
};

#[derive(Debug, Clone, Serialize)]
pub struct MetricDto {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub unit: Unit,
    pub window: Option<usize>,
    pub shared_scale: bool,
    pub comparison: bool,
    pub resources: Resources,
}

impl MetricDto {
    pub fn from_spec(spec: &MetricSpec, default_window: usize) -> Self {
        Self {
            id: spec.id.clone(),
            title: spec.title.clone(),
            kind: spec.kind,
            unit: spec.unit,
            window: spec.effective_window(default_window),
            shared_scale: spec.shared_scale,
            comparison: spec.comparison,
            resources: spec.resources.clone(),
        }
    }
}
