//! Runtime configuration utilities for chain-compare.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::series::rolling::DEFAULT_WINDOW;

/// Earliest date any dashboard shows unless `CUTOFF_DATE` says otherwise.
pub const DEFAULT_CUTOFF: &str = "2024-01-01";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder holding the metric CSV exports.
    pub data_dir: PathBuf,
    /// Root folder for rendered chart specifications.
    pub outputs_dir: PathBuf,
    /// Optional HTTP mirror of `data_dir`; takes precedence when set.
    pub data_base_url: Option<String>,
    /// Rows dated before this never reach a chart.
    pub cutoff: NaiveDate,
    /// Trailing window for smoothed metrics.
    pub rolling_window: usize,
    /// Static assets served alongside the API.
    pub static_dir: PathBuf,
    /// JSON metric catalog replacing the built-in one.
    pub metrics_file: Option<PathBuf>,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let data_base_url = env::var("DATA_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let cutoff_raw = env::var("CUTOFF_DATE").unwrap_or_else(|_| DEFAULT_CUTOFF.to_string());
        let cutoff = NaiveDate::parse_from_str(cutoff_raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("parsing CUTOFF_DATE {cutoff_raw:?}"))?;
        let rolling_window = env::var("ROLLING_WINDOW")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_WINDOW);
        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./static"));
        let metrics_file = env::var("METRICS_FILE").ok().map(PathBuf::from);

        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            data_dir,
            outputs_dir,
            data_base_url,
            cutoff,
            rolling_window,
            static_dir,
            metrics_file,
        })
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
