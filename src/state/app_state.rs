//! Shared application state for the HTTP layer

use std::{fmt, time::Instant};

use crate::engine::TimerEngine;

/// State shared by all request handlers
pub struct AppState {
    /// The countdown engine; holds no timer state itself
    pub engine: TimerEngine,
    /// Shared secret expected in the `X-API-Key` header
    api_key: String,
    /// Server metadata
    pub started_at: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(engine: TimerEngine, api_key: impl Into<String>, host: String, port: u16) -> Self {
        Self {
            engine,
            api_key: api_key.into(),
            started_at: Instant::now(),
            port,
            host,
        }
    }

    /// Check a presented credential against the configured key
    pub fn authorize(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(key) => constant_time_eq(key.as_bytes(), self.api_key.as_bytes()),
            None => false,
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.started_at.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
