//! Event Countdown - A shared countdown timer served over HTTP
//!
//! One global countdown whose running time is reconstructed from a persisted
//! start instant, so every display and every restart agrees on what is left.

pub mod api;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use engine::TimerEngine;
pub use error::{ErrorKind, StorageError, TimerError};
pub use state::{AppState, TimerRecord};
pub use store::{FileStore, MemoryStore, TimerStore};
pub use utils::signals::shutdown_signal;
