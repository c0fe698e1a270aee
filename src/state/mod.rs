//! State management module
//!
//! This module contains the persisted timer record and the shared state
//! handed to HTTP handlers.

pub mod app_state;
pub mod timer_record;

// Re-export main types
pub use app_state::AppState;
pub use timer_record::TimerRecord;
