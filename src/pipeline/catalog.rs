//! Metric definitions driving the generic pipeline.

use std::{collections::HashSet, path::{Path, PathBuf}};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    chart::{ChartKind, TickFormat},
    data::parse::ColumnLayout,
    series::{units::Unit, Entity},
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog defines no metrics")]
    Empty,
    #[error("metric id {0:?} is defined more than once")]
    DuplicateId(String),
}

/// CSV resource names, one per entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub solana: String,
    pub ethereum: String,
}

impl Resources {
    pub fn get(&self, entity: Entity) -> &str {
        match entity {
            Entity::Solana => &self.solana,
            Entity::Ethereum => &self.ethereum,
        }
    }
}

/// One dashboard metric: where its data lives and how it is prepared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub id: String,
    pub title: String,
    pub axis_title: String,
    pub dataset_label: String,
    pub resources: Resources,
    #[serde(default)]
    pub layout: ColumnLayout,
    #[serde(default)]
    pub unit: Unit,
    /// Apply a trailing mean before charting.
    #[serde(default)]
    pub smoothed: bool,
    /// Window override; the configured default applies when absent.
    #[serde(default)]
    pub window: Option<usize>,
    /// Cutoff override; the configured default applies when absent.
    #[serde(default)]
    pub cutoff: Option<NaiveDate>,
    #[serde(default)]
    pub kind: ChartKind,
    /// Give both entity charts the same value ceiling.
    #[serde(default)]
    pub shared_scale: bool,
    /// Also emit one chart with both entities on common dates.
    #[serde(default)]
    pub comparison: bool,
    #[serde(default)]
    pub ticks: TickFormat,
}

impl MetricSpec {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        solana: impl Into<String>,
        ethereum: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            axis_title: title.clone(),
            dataset_label: title.clone(),
            title,
            resources: Resources {
                solana: solana.into(),
                ethereum: ethereum.into(),
            },
            layout: ColumnLayout::default(),
            unit: Unit::default(),
            smoothed: false,
            window: None,
            cutoff: None,
            kind: ChartKind::default(),
            shared_scale: false,
            comparison: false,
            ticks: TickFormat::default(),
        }
    }

    pub fn labelled(mut self, axis_title: &str, dataset_label: &str) -> Self {
        self.axis_title = axis_title.to_string();
        self.dataset_label = dataset_label.to_string();
        self
    }

    pub fn layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn smoothed(mut self) -> Self {
        self.smoothed = true;
        self
    }

    pub fn bar(mut self) -> Self {
        self.kind = ChartKind::Bar;
        self
    }

    pub fn shared_scale(mut self) -> Self {
        self.shared_scale = true;
        self
    }

    pub fn comparison(mut self) -> Self {
        self.comparison = true;
        self
    }

    pub fn ticks(mut self, prefix: &str, decimals: usize) -> Self {
        self.ticks = TickFormat::new(prefix, decimals, self.unit.suffix());
        self
    }

    /// Window actually used, or `None` when the metric is not smoothed.
    pub fn effective_window(&self, default: usize) -> Option<usize> {
        self.smoothed.then(|| self.window.unwrap_or(default))
    }

    pub fn effective_cutoff(&self, default: NaiveDate) -> NaiveDate {
        self.cutoff.unwrap_or(default)
    }
}

/// Ordered set of metrics with unique ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub metrics: Vec<MetricSpec>,
}

impl Catalog {
    /// The seven Solana vs. Ethereum dashboards.
    pub fn builtin() -> Self {
        let metrics = vec![
            MetricSpec::new(
                "rev",
                "Real Economic Value",
                "REV Charts/Solana REV.csv",
                "REV Charts/Ethereum REV.csv",
            )
            .labelled("Revenue ($ Millions)", "Real Economic Value ($M)")
            .unit(Unit::Millions)
            .ticks("$", 1),
            MetricSpec::new(
                "fees",
                "Transaction Fees",
                "Fee Charts/Solana Fees.csv",
                "Fee Charts/Ethereum Fees.csv",
            )
            .labelled("Fees ($ Millions)", "Fees ($M)")
            .layout(ColumnLayout::TimestampDateValue)
            .unit(Unit::Millions)
            .smoothed()
            .shared_scale()
            .ticks("$", 1),
            MetricSpec::new(
                "app-revenue",
                "Total Application Revenue",
                "App Revenue Charts/Solana App Revenue.csv",
                "App Revenue Charts/Ethereum App Revenue.csv",
            )
            .labelled("Revenue ($ Millions)", "App Revenue ($M)")
            .unit(Unit::Millions)
            .bar()
            .shared_scale()
            .comparison()
            .ticks("$", 0),
            MetricSpec::new(
                "dex-volume",
                "DEX Volumes",
                "DEX Charts/Solana DEX Volume.csv",
                "DEX Charts/Ethereum DEX Volume.csv",
            )
            .labelled("Volume ($ Billions)", "DEX Volume ($B)")
            .layout(ColumnLayout::Summed)
            .unit(Unit::Billions)
            .smoothed()
            .shared_scale()
            .comparison()
            .ticks("$", 1),
            MetricSpec::new(
                "active-addresses",
                "Active Addresses",
                "Active Address Charts/Solana Active Addresses.csv",
                "Active Address Charts/Ethereum Active Addresses.csv",
            )
            .labelled("Addresses (Thousands)", "Active Addresses (K)")
            .layout(ColumnLayout::TimestampDateValue)
            .unit(Unit::Thousands)
            .smoothed()
            .shared_scale()
            .ticks("", 0),
            MetricSpec::new(
                "transactions",
                "Transaction Count",
                "Transaction Charts/Solana Transactions.csv",
                "Transaction Charts/Ethereum Transactions.csv",
            )
            .labelled("Transactions (Millions)", "Transactions (M)")
            .layout(ColumnLayout::TimestampDateValue)
            .unit(Unit::Millions)
            .smoothed()
            .shared_scale()
            .comparison()
            .ticks("", 1),
            MetricSpec::new(
                "avg-fee",
                "Average Fee per Transaction",
                "Fee Charts/Solana Average Fee.csv",
                "Fee Charts/Ethereum Average Fee.csv",
            )
            .labelled("Fee per Transaction ($)", "Average Fee ($)")
            .smoothed()
            .ticks("$", 4),
        ];
        Self { metrics }
    }

    /// Read a JSON catalog of the form `{"metrics": [...]}`.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog =
            serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        catalog.validate()?;
        info!(path = %path.display(), metrics = catalog.metrics.len(), "loaded metric catalog");
        Ok(catalog)
    }

    /// Catalog file when one is configured, otherwise the built-in metrics.
    pub fn resolve(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.metrics.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if !seen.insert(metric.id.as_str()) {
                return Err(CatalogError::DuplicateId(metric.id.clone()));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&MetricSpec> {
        self.metrics.iter().find(|m| m.id == id)
    }
}
