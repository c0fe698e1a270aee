//! Values returned by engine operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::timer_record::iso_instant;

/// Public view of the timer, with remaining time derived at read time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerStatus {
    pub is_running: bool,
    pub remaining_seconds: u64,
    pub duration_seconds: u64,
    #[serde(default, with = "iso_instant")]
    pub start_time: Option<DateTime<Utc>>,
}

/// Result of a successful start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOutcome {
    pub start_time: DateTime<Utc>,
    pub duration_seconds: u64,
}

/// Result of reconciling a client's remaining time with the server's
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub server_remaining: u64,
    pub client_remaining: i64,
    /// Set only when the drift exceeded the tolerance
    pub drift_seconds: Option<u64>,
}

impl SyncOutcome {
    /// Whether the client must re-align its display to `server_remaining`
    pub fn corrected(&self) -> bool {
        self.drift_seconds.is_some()
    }
}
