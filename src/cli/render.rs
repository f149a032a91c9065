//! CLI entry-point for writing the dashboard to disk.

use std::fs::File;

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{
    chart,
    config::Settings,
    pipeline::{catalog::MetricSpec, MetricReport},
    series::Entity,
};

/// Args for the `render` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Comma separated metric ids; all metrics when omitted.
    #[arg(long, value_delimiter = ',')]
    pub metrics: Vec<String>,
    /// Also write `<metric>_<entity>.csv` with label/value rows.
    #[arg(long)]
    pub csv: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let mut runner = super::build_runner(&settings)?;
    if !args.metrics.is_empty() {
        for id in &args.metrics {
            if runner.catalog.get(id).is_none() {
                bail!("unknown metric {id:?}");
            }
        }
        runner.catalog.metrics.retain(|m| args.metrics.contains(&m.id));
    }

    let dashboard = runner.dashboard().await;
    write_json(&settings, "dashboard.json", &dashboard)?;

    for (report, spec) in dashboard.metrics.iter().zip(&runner.catalog.metrics) {
        if report.is_empty() {
            warn!(metric = %report.id, "no charts prepared");
            remove_stale(&settings, &report.id)?;
            continue;
        }
        write_json(&settings, &format!("{}.json", report.id), &report.charts)?;
        if args.csv {
            write_series_csv(&settings, spec, report)?;
        }
    }

    let prepared = dashboard.metrics.iter().filter(|m| !m.is_empty()).count();
    info!(
        prepared,
        total = dashboard.metrics.len(),
        dir = %settings.outputs_dir.display(),
        "dashboard rendered"
    );
    Ok(())
}

fn write_json<T: serde::Serialize>(settings: &Settings, name: &str, value: &T) -> Result<()> {
    let path = settings.join_output(name);
    let file = File::create(&path).with_context(|| format!("create {path:?}"))?;
    serde_json::to_writer_pretty(file, value).with_context(|| format!("write {path:?}"))?;
    Ok(())
}

/// Drop files left by an earlier run so they never disagree with `dashboard.json`.
fn remove_stale(settings: &Settings, id: &str) -> Result<()> {
    let mut names = vec![format!("{id}.json")];
    names.extend(Entity::ALL.iter().map(|e| format!("{id}_{}.csv", e.slug())));
    for name in names {
        let path = settings.join_output(name);
        if path.exists() {
            std::fs::remove_file(&path).with_context(|| format!("remove {path:?}"))?;
            info!(path = %path.display(), "removed stale output");
        }
    }
    Ok(())
}

fn write_series_csv(settings: &Settings, spec: &MetricSpec, report: &MetricReport) -> Result<()> {
    for (entity, points) in &report.series {
        let path = settings.join_output(format!("{}_{}.csv", report.id, entity.slug()));
        let (labels, values) = chart::axis_data(points, spec.unit);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["label", "value"])?;
        for (label, value) in labels.iter().zip(&values) {
            writer.write_record([label.as_str(), value.to_string().as_str()])?;
        }
        writer.flush()?;
        info!(path = %path.display(), rows = labels.len(), "wrote series csv");
    }
    Ok(())
}

