//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, response::Json};
use tracing::info;

use super::{
    error::ApiError,
    responses::{
        DurationResponse, HealthResponse, SetDurationRequest, StartResponse, StopResponse,
        SyncRequest, SyncResponse,
    },
};
use crate::{
    engine::{TimerEngine, TimerStatus},
    error::Result as TimerResult,
    state::AppState,
};

/// Run an engine operation on the blocking pool
///
/// Engine calls wait on the store's writer lock and on file I/O, neither of
/// which may park a runtime worker.
async fn run_engine<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&TimerEngine) -> TimerResult<T> + Send + 'static,
    T: Send + 'static,
{
    let engine = state.engine.clone();
    let outcome = tokio::task::spawn_blocking(move || op(&engine))
        .await
        .map_err(ApiError::TaskFailed)?;
    Ok(outcome?)
}

/// Handle GET /api/timer/status - Public timer status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerStatus>, ApiError> {
    Ok(Json(run_engine(&state, |engine| engine.status()).await?))
}

/// Handle POST /api/timer/start - Start the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StartResponse>, ApiError> {
    let outcome = run_engine(&state, |engine| engine.start()).await?;
    info!("Start endpoint called - countdown running");
    Ok(Json(outcome.into()))
}

/// Handle POST /api/timer/sync - Reconcile a client's remaining time
pub async fn sync_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SyncRequest>>,
) -> Result<Json<SyncResponse>, ApiError> {
    let client_remaining = body
        .and_then(|Json(req)| req.remaining_seconds)
        .ok_or(ApiError::MissingField("remaining_seconds"))?;

    let outcome = run_engine(&state, move |engine| engine.sync(client_remaining)).await?;
    Ok(Json(outcome.into()))
}

/// Handle POST /api/timer/stop - Freeze the countdown
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StopResponse>, ApiError> {
    let remaining = run_engine(&state, |engine| engine.stop()).await?;
    info!("Stop endpoint called - countdown frozen");
    Ok(Json(StopResponse::new(remaining)))
}

/// Handle POST /api/timer/reset - Back to the default duration
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DurationResponse>, ApiError> {
    let duration_seconds = run_engine(&state, |engine| engine.reset()).await?;
    info!("Reset endpoint called");
    Ok(Json(DurationResponse::reset(duration_seconds)))
}

/// Handle POST /api/timer/set-duration - Change the countdown length
pub async fn set_duration_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SetDurationRequest>>,
) -> Result<Json<DurationResponse>, ApiError> {
    let minutes = body
        .and_then(|Json(req)| req.duration_minutes)
        .ok_or(ApiError::MissingField("duration_minutes"))?;

    let duration_seconds =
        run_engine(&state, move |engine| engine.set_duration(minutes)).await?;
    Ok(Json(DurationResponse::set(minutes, duration_seconds)))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(
        state.get_uptime(),
        state.host.clone(),
        state.port,
    ))
}
