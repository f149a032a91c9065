//! Solana vs. Ethereum comparison dashboards: CSV time series in, chart
//! specifications out.

pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod pipeline;
pub mod series;
