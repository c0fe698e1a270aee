//! Countdown state machine
//!
//! This module contains the timer engine and the values its operations return.

pub mod outcomes;
pub mod timer_engine;

// Re-export main types
pub use outcomes::{StartOutcome, SyncOutcome, TimerStatus};
pub use timer_engine::TimerEngine;
