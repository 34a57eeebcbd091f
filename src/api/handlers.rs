//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    state::{AppState, FormPatch, StoreEvent, Timer, TimerForm},
    view::{BoardView, FormView},
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

fn current_board(state: &AppState) -> Result<BoardView, StatusCode> {
    state.board().map_err(|e| {
        error!("Failed to build board: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Shared response for both add paths
fn add_response(
    state: &AppState,
    result: Result<Option<Timer>, String>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    match result {
        Ok(Some(timer)) => {
            let board = current_board(state)?;
            Ok((StatusCode::CREATED, Json(ApiResponse::added(timer, board))))
        }
        Ok(None) => {
            debug!("Add ignored, form incomplete or invalid");
            let board = current_board(state)?;
            Ok((StatusCode::OK, Json(ApiResponse::ignored(board))))
        }
        Err(e) => {
            error!("Failed to add timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timers - Add a timer from an explicit form body
pub async fn create_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<TimerForm>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    let result = state.add_timer(&form.title, &form.category, &form.target);
    add_response(&state, result)
}

/// Handle POST /form/submit - Add a timer from the draft form
pub async fn submit_form_handler(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    let result = state.submit_form();
    add_response(&state, result)
}

/// Handle PUT /form - Edit draft form fields
pub async fn update_form_handler(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<FormPatch>,
) -> Result<Json<FormView>, StatusCode> {
    match state.update_form(patch) {
        Ok(form) => Ok(Json(FormView::build(&form))),
        Err(e) => {
            error!("Failed to update form: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle DELETE /timers/:id - Remove a finished timer
pub async fn remove_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let timer = match state.get_timer(id) {
        Ok(Some(timer)) => timer,
        Ok(None) => {
            debug!("Remove requested for unknown timer {}", id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(e) => {
            error!("Failed to look up timer {}: {}", id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if !timer.is_finished() {
        warn!("Refusing to remove timer {} with {}s remaining", id, timer.time_remaining);
        return Err(StatusCode::CONFLICT);
    }

    match state.remove_timer(id) {
        Ok(Some(removed)) => {
            let board = current_board(&state)?;
            Ok(Json(ApiResponse::removed(removed, board)))
        }
        // Removed concurrently between lookup and removal
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to remove timer {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /timers - Raw timer records in display order
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Timer>>, StatusCode> {
    state.get_timers().map(Json).map_err(|e| {
        error!("Failed to list timers: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /board - Form and cards
pub async fn board_handler(State(state): State<Arc<AppState>>) -> Result<Json<BoardView>, StatusCode> {
    current_board(&state).map(Json)
}

fn board_event(state: &AppState) -> Result<Event, axum::Error> {
    let board = state.board().map_err(axum::Error::new)?;
    Event::default().event("board").json_data(&board)
}

/// Handle GET /board/events - Push the board on connect and after every change
pub async fn board_events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    info!("Board event stream opened");

    let rx = state.subscribe();
    let initial = board_event(&state);

    let updates = stream::unfold((state, rx), |(state, mut rx)| async move {
        loop {
            match rx.recv().await {
                // A tick event always follows
                Ok(StoreEvent::TimerFinished { .. }) => continue,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    debug!("Event stream skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
            let event = board_event(&state);
            return Some((event, (state, rx)));
        }
    });

    Sse::new(stream::once(async move { initial }).chain(updates)).keep_alive(KeepAlive::default())
}

/// Handle GET /status - Return timer counts and server info
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timers = match state.get_timers() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timers: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let running_timers = timers.iter().filter(|timer| timer.is_running).count();
    let finished_timers = timers.iter().filter(|timer| timer.is_finished()).count();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        total_timers: timers.len(),
        running_timers,
        finished_timers,
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
