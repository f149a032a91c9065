//! Route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::types::MetricDto,
    pipeline::{Dashboard, MetricReport},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub async fn list_metrics(State(state): State<AppState>) -> Json<Vec<MetricDto>> {
    let window = state.runner.defaults.window;
    Json(
        state
            .runner
            .catalog
            .metrics
            .iter()
            .map(|spec| MetricDto::from_spec(spec, window))
            .collect(),
    )
}

pub async fn metric_charts(
    Path(metric): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<MetricReport> {
    state
        .runner
        .run_one(&metric)
        .await
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown metric {metric:?}")))
}

pub async fn dashboard(State(state): State<AppState>) -> Json<Dashboard> {
    Json(state.runner.dashboard().await)
}
