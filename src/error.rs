//! Error types for the timer core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for timer operations
pub type Result<T> = std::result::Result<T, TimerError>;

/// Failures of the durable record store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read timer record from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write timer record to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("corrupt timer record in {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode timer record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors returned by [`crate::engine::TimerEngine`] operations
#[derive(Error, Debug)]
pub enum TimerError {
    #[error("Timer already running")]
    AlreadyRunning,

    #[error("Timer not running")]
    NotRunning,

    #[error("Stop the timer before changing duration")]
    StillRunning,

    #[error("Duration must be between 1 and 300 minutes")]
    InvalidDuration(i64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Coarse classification used by the HTTP layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed, missing or out-of-range input
    Validation,
    /// Operation not valid for the current run state
    StateConflict,
    /// Persistence medium failure
    Storage,
}

impl TimerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDuration(_) => ErrorKind::Validation,
            Self::AlreadyRunning | Self::NotRunning | Self::StillRunning => {
                ErrorKind::StateConflict
            }
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
