//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{StartOutcome, SyncOutcome},
    state::timer_record::iso_instant,
};

/// Body of POST /api/timer/sync
#[derive(Debug, Clone, Deserialize)]
pub struct SyncRequest {
    pub remaining_seconds: Option<i64>,
}

/// Body of POST /api/timer/set-duration
#[derive(Debug, Clone, Deserialize)]
pub struct SetDurationRequest {
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartResponse {
    pub message: String,
    #[serde(with = "iso_instant")]
    pub start_time: Option<DateTime<Utc>>,
    pub duration_seconds: u64,
}

impl From<StartOutcome> for StartResponse {
    fn from(outcome: StartOutcome) -> Self {
        Self {
            message: "Timer started".to_string(),
            start_time: Some(outcome.start_time),
            duration_seconds: outcome.duration_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopResponse {
    pub message: String,
    pub remaining_seconds: u64,
}

impl StopResponse {
    pub fn new(remaining_seconds: u64) -> Self {
        Self {
            message: "Timer stopped".to_string(),
            remaining_seconds,
        }
    }
}

/// Response for reset and set-duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationResponse {
    pub message: String,
    pub duration_seconds: u64,
}

impl DurationResponse {
    pub fn reset(duration_seconds: u64) -> Self {
        let hours = duration_seconds / 3600;
        Self {
            message: format!(
                "Timer reset to {} hour{}",
                hours,
                if hours == 1 { "" } else { "s" }
            ),
            duration_seconds,
        }
    }

    pub fn set(minutes: i64, duration_seconds: u64) -> Self {
        Self {
            message: format!("Timer duration set to {} minutes", minutes),
            duration_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    pub message: String,
    pub server_remaining: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_seconds: Option<u64>,
    pub corrected: bool,
}

impl From<SyncOutcome> for SyncResponse {
    fn from(outcome: SyncOutcome) -> Self {
        if outcome.corrected() {
            Self {
                message: "Time corrected".to_string(),
                server_remaining: outcome.server_remaining,
                client_remaining: Some(outcome.client_remaining),
                drift_seconds: outcome.drift_seconds,
                corrected: true,
            }
        } else {
            Self {
                message: "Sync successful".to_string(),
                server_remaining: outcome.server_remaining,
                client_remaining: None,
                drift_seconds: None,
                corrected: false,
            }
        }
    }
}

/// Error body; `message` is present for 401 and 500 responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
    pub host: String,
    pub port: u16,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok(uptime: String, host: String, port: u16) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
            host,
            port,
        }
    }
}
