//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers, the API key middleware
//! and the request/response structures.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use auth::require_api_key;
use handlers::*;

pub use error::ApiError;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/timer/start", post(start_handler))
        .route("/api/timer/sync", post(sync_handler))
        .route("/api/timer/stop", post(stop_handler))
        .route("/api/timer/reset", post(reset_handler))
        .route("/api/timer/set-duration", post(set_duration_handler))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_api_key,
        ));

    Router::new()
        .route("/api/timer/status", get(status_handler))
        .route("/health", get(health_handler))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
