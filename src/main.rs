// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{collections::HashSet, net::SocketAddr, sync::Arc};
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::chart_manager::ChartManager;
use crate::application::dispatcher;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::history_client::HttpHistorySource;
use crate::infrastructure::render_surface::RenderSurface;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    chart_snapshot, dashboard_snapshot, health_check, live_update, select_period,
};

const COMMAND_BUFFER: usize = 100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let devices = config.devices();

    // Page and history source (infrastructure layer)
    let surface = RenderSurface::new(&devices);
    let source = Arc::new(HttpHistorySource::new(
        config.backend.base_url.clone(),
        config.request_timeout(),
        config.retry_policy(),
    )?);

    // Chart manager, owned by the dispatcher task (application layer)
    let page = Arc::new(surface.clone());
    let manager = ChartManager::new(source, page.clone(), page, config.display.language);
    let device_ids: Vec<String> = devices.iter().map(|d| d.id.clone()).collect();
    let (commands, rx) = dispatcher::channel(COMMAND_BUFFER);
    tokio::spawn(dispatcher::run(manager, device_ids.clone(), rx));

    let state = Arc::new(AppState {
        surface,
        commands,
        devices: device_ids.into_iter().collect::<HashSet<_>>(),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(dashboard_snapshot))
        .route("/charts/:id", get(chart_snapshot))
        .route("/devices/:id/period", post(select_period))
        .route("/live", post(live_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.listen.parse()?;
    tracing::info!(
        "Starting UPS history charts on {} ({} devices, backend {})",
        addr,
        devices.len(),
        config.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
