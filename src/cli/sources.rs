//! CLI entry-point for listing local CSV exports.

use std::collections::BTreeSet;

use anyhow::Result;
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

use crate::{config::Settings, pipeline::catalog::Catalog, series::Entity};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    if let Some(base) = &settings.data_base_url {
        info!(%base, "DATA_BASE_URL is set; listing the local data dir only");
    }
    let catalog = Catalog::resolve(settings.metrics_file.as_deref())?;

    let found: BTreeSet<String> = WalkDir::new(&settings.data_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(&settings.data_dir)
                .ok()
                .map(|rel| rel.to_string_lossy().replace('\\', "/"))
        })
        .collect();

    println!("{} csv files under {}", found.len(), settings.data_dir.display());
    for path in &found {
        println!("  {path}");
    }

    let mut missing = 0usize;
    for metric in &catalog.metrics {
        for entity in Entity::ALL {
            let resource = metric.resources.get(entity);
            if !found.contains(resource) {
                warn!(metric = %metric.id, %entity, %resource, "resource missing");
                missing += 1;
            }
        }
    }
    info!(files = found.len(), missing, "source scan complete");
    Ok(())
}
