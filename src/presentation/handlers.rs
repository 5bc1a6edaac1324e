// HTTP request handlers
use crate::domain::period::WindowPeriod;
use crate::domain::sample::Sample;
use crate::infrastructure::render_surface::{RenderedChart, SurfaceState};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PeriodSelection {
    pub period: WindowPeriod,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Whole page as last rendered
pub async fn dashboard_snapshot(State(state): State<Arc<AppState>>) -> Json<SurfaceState> {
    Json(state.surface.snapshot())
}

pub async fn chart_snapshot(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RenderedChart>, StatusCode> {
    state.surface.chart(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// A period button press for one device
pub async fn select_period(
    Path(device): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(selection): Json<PeriodSelection>,
) -> StatusCode {
    if !state.devices.contains(&device) {
        return StatusCode::NOT_FOUND;
    }

    match state.commands.select_period(device, selection.period) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::warn!("Could not queue period selection: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Live feed message: latest sample keyed by device
pub async fn live_update(
    State(state): State<Arc<AppState>>,
    Json(update): Json<HashMap<String, Sample>>,
) -> StatusCode {
    match state.commands.live_update(update) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::warn!("Could not queue live update: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
