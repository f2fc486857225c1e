//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::state::{AppState, FeatureId, ViewSnapshot};
use super::responses::{ApiResponse, StatusResponse, HealthResponse};

/// Turn a controller result into a JSON response or a 500
fn respond(
    action: &str,
    result: Result<ViewSnapshot, String>,
    message: impl FnOnce(&ViewSnapshot) -> String,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(view) => {
            info!("{} endpoint called - stopwatch at {}", action, view.display);
            let message = message(&view);
            Ok(Json(ApiResponse::from_view(message, view)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the stopwatch
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("start", state.start(), |_| "Stopwatch running".to_string())
}

/// Handle POST /pause - Pause the stopwatch
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("pause", state.pause(), |view| format!("Stopwatch paused at {}", view.display))
}

/// Handle POST /toggle - Start or pause depending on the current state
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("toggle", state.toggle_run(), |view| {
        if view.timer.is_running {
            "Stopwatch running".to_string()
        } else {
            format!("Stopwatch paused at {}", view.display)
        }
    })
}

/// Handle POST /reset - Zero and stop the stopwatch
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("reset", state.reset(), |_| "Stopwatch reset".to_string())
}

/// Handle POST /select/:id - Toggle the highlighted feature tile
pub async fn select_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<FeatureId>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond("select", state.select(id), |view| match view.selection.selected_id {
        Some(selected) => format!("Feature {} selected", selected),
        None => format!("Feature {} deselected", id),
    })
}

/// Handle GET /status - Return current view and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let view = match state.snapshot() {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to get view state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        view,
        tick_period_ms: state.tick_period.as_millis() as u64,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handle GET /events - Stream view snapshots, current one first
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    info!("View event stream opened");

    let events = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            info!("View event stream closed");
            return None;
        }

        let view = rx.borrow_and_update().clone();
        let event = Event::default()
            .event("view")
            .json_data(&view)
            .unwrap_or_else(|e| {
                warn!("Failed to encode view event: {}", e);
                Event::default().event("error").data(e.to_string())
            });
        Some((Ok(event), (rx, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
