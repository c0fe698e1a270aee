//! Durable storage for the timer record
//!
//! A store owns the only copy of the record and the lock that serializes
//! read-modify-write cycles against it.

pub mod file_store;
pub mod memory_store;

use std::sync::MutexGuard;

use crate::{error::StorageError, state::TimerRecord};

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Single-record store backing the timer engine
pub trait TimerStore: Send + Sync + std::fmt::Debug {
    /// Persisted record, or the default record if none has been saved yet
    fn load(&self) -> Result<TimerRecord, StorageError>;

    /// Replace the persisted record; readers never observe a partial write
    fn save(&self, record: &TimerRecord) -> Result<(), StorageError>;

    /// Exclusive writer lock, held across a whole load→save cycle
    fn lock_writer(&self) -> MutexGuard<'_, ()>;
}
