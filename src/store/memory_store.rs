//! In-memory store, used for tests and `--in-memory` runs

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use super::TimerStore;
use crate::{error::StorageError, state::TimerRecord};

#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RwLock<Option<TimerRecord>>,
    writer: Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `record`
    pub fn with_record(record: TimerRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
            writer: Mutex::new(()),
        }
    }
}

impl TimerStore for MemoryStore {
    fn load(&self) -> Result<TimerRecord, StorageError> {
        let record = self.record.read().unwrap_or_else(PoisonError::into_inner);
        Ok(record.clone().unwrap_or_default())
    }

    fn save(&self, record: &TimerRecord) -> Result<(), StorageError> {
        *self.record.write().unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
        Ok(())
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_default() {
        assert_eq!(MemoryStore::new().load().unwrap(), TimerRecord::default());
    }

    #[test]
    fn test_save_replaces_record() {
        let store = MemoryStore::with_record(TimerRecord {
            remaining_seconds: 10,
            ..TimerRecord::default()
        });
        assert_eq!(store.load().unwrap().remaining_seconds, 10);

        store.save(&TimerRecord::default()).unwrap();
        assert_eq!(store.load().unwrap(), TimerRecord::default());
    }
}
