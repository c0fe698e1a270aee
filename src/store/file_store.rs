//! JSON file store with atomic replacement

use std::{
    ffi::OsString,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::debug;

use super::TimerStore;
use crate::{error::StorageError, state::TimerRecord};

/// Stores the record as pretty-printed JSON in a single file
///
/// Saves go to a sibling temp file which is synced and then renamed over the
/// target, so a concurrent reader sees either the old or the new record.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    writer: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_atomic(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let tmp = self.temp_path();
        let result = (|| {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

impl TimerStore for FileStore {
    fn load(&self) -> Result<TimerRecord, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No timer record at {}, using defaults", self.path.display());
                return Ok(TimerRecord::default());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let record: TimerRecord =
            serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(record.normalized())
    }

    fn save(&self, record: &TimerRecord) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(record)?;
        self.write_atomic(&bytes).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Timer record saved to {}", self.path.display());
        Ok(())
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
