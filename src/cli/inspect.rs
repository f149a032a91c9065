//! CLI entry-point for summarising one prepared metric.

use anyhow::{anyhow, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{chart::scale, config::Settings, series};

/// Args for the `inspect` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Metric id from the catalog (e.g. `dex-volume`).
    #[arg(long)]
    pub metric: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let runner = super::build_runner(&settings)?;
    let spec = runner
        .catalog
        .get(&args.metric)
        .ok_or_else(|| anyhow!("unknown metric {:?}", args.metric))?
        .clone();
    let report = runner
        .run_one(&spec.id)
        .await
        .ok_or_else(|| anyhow!("unknown metric {:?}", args.metric))?;

    println!("{} ({})", report.title, report.id);
    if report.is_empty() {
        println!("  no data: see log for the failing source");
        return Ok(());
    }

    let mut scaled = Vec::new();
    for (entity, points) in &report.series {
        let values = spec.unit.scale_all(points.iter().map(|p| p.value));
        match (points.first(), points.last(), series::max_value(points)) {
            (Some(first), Some(last), Some(max)) => println!(
                "  {entity}: {} points, {} .. {}, last {}, peak {}",
                points.len(),
                first.date,
                last.date,
                spec.ticks.render(spec.unit.scale(last.value)),
                spec.ticks.render(spec.unit.scale(max)),
            ),
            _ => println!("  {entity}: no points on or after the cutoff"),
        }
        scaled.push(values);
    }
    if let Some(ceiling) = scale::shared_ceiling(scaled.iter().map(Vec::as_slice)) {
        println!("  shared ceiling: {}", spec.ticks.render(ceiling));
    }
    Ok(())
}
