//! Declarative chart options derived from one shared, immutable base.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const GRID_COLOR: &str = "rgba(0,0,0,0.1)";

/// Defaults every chart starts from. Never mutated; each chart clones and
/// layers its own settings on top.
pub static BASE_OPTIONS: Lazy<ChartOptions> = Lazy::new(|| ChartOptions {
    responsive: true,
    maintain_aspect_ratio: false,
    plugins: Plugins {
        legend: Legend {
            display: true,
            position: "top".to_string(),
        },
        title: None,
    },
    scales: Scales {
        x: Axis::base(),
        y: Axis {
            begin_at_zero: true,
            ..Axis::base()
        },
    },
});

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

impl ChartOptions {
    /// A fresh copy of the base options.
    pub fn base() -> Self {
        BASE_OPTIONS.clone()
    }

    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.plugins.title = Some(Title::shown(text));
        self
    }

    pub fn with_x_title(mut self, text: impl Into<String>) -> Self {
        self.scales.x.title = Some(Title::shown(text));
        self
    }

    pub fn with_y_axis(mut self, text: impl Into<String>, ticks: TickFormat) -> Self {
        self.scales.y.title = Some(Title::shown(text));
        self.scales.y.ticks = Some(ticks);
        self
    }

    pub fn with_y_max(mut self, max: Option<f64>) -> Self {
        self.scales.y.max = max;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    fn shown(text: impl Into<String>) -> Self {
        Self {
            display: true,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub grid: Grid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<TickFormat>,
}

impl Axis {
    fn base() -> Self {
        Self {
            begin_at_zero: false,
            max: None,
            grid: Grid {
                color: GRID_COLOR.to_string(),
            },
            title: None,
            ticks: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub color: String,
}

/// Tick label format the sink applies to axis values, e.g. `$12.5M`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickFormat {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub decimals: usize,
    #[serde(default)]
    pub suffix: String,
}

impl TickFormat {
    pub fn new(prefix: impl Into<String>, decimals: usize, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            decimals,
            suffix: suffix.into(),
        }
    }

    pub fn render(&self, value: f64) -> String {
        format!("{}{:.*}{}", self.prefix, self.decimals, value, self.suffix)
    }
}
