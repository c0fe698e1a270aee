//! API key check for mutating endpoints

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject the request with 401 unless it carries the configured API key
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if !state.authorize(presented) {
        warn!("Rejected {} {}: invalid API key", request.method(), request.uri().path());
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
