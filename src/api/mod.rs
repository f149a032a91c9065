//! HTTP layer exposing prepared chart specifications and static assets.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{config::Settings, data::source::AnySource, pipeline::Runner};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub runner: Arc<Runner<AnySource>>,
}

pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.settings.static_dir);
    Router::new()
        .route("/api/metrics", get(routes::list_metrics))
        .route("/api/charts/:metric", get(routes::metric_charts))
        .route("/api/dashboard", get(routes::dashboard))
        .fallback_service(static_dir)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(
    settings: Settings,
    runner: Runner<AnySource>,
    host: String,
    port: u16,
) -> Result<()> {
    let state = AppState {
        settings,
        runner: Arc::new(runner),
    };
    let router = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving chain-compare API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
