//! Timer engine: derives remaining time and applies state transitions

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::outcomes::{StartOutcome, SyncOutcome, TimerStatus};
use crate::{
    clock::Clock,
    error::{Result, TimerError},
    state::timer_record::{
        TimerRecord, DRIFT_TOLERANCE_SECS, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES,
    },
    store::TimerStore,
};

/// The countdown state machine
///
/// Holds no timer state of its own. Every operation re-reads the record from
/// the store, and every mutation happens under the store's writer lock, so
/// engines sharing a store always agree.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    store: Arc<dyn TimerStore>,
    clock: Arc<dyn Clock>,
}

impl TimerEngine {
    pub fn new(store: Arc<dyn TimerStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Remaining whole seconds of `record` as of now
    pub fn derive_remaining(&self, record: &TimerRecord) -> u64 {
        record.remaining_at(self.clock.now())
    }

    /// Current status, without persisting anything
    pub fn status(&self) -> Result<TimerStatus> {
        let record = self.store.load()?;
        let remaining_seconds = self.derive_remaining(&record);
        debug!(
            "Status read: running={}, remaining={}s",
            record.is_running, remaining_seconds
        );

        Ok(TimerStatus {
            is_running: record.is_running,
            remaining_seconds,
            duration_seconds: record.duration_seconds,
            start_time: record.start_time,
        })
    }

    /// Begin a run of the configured duration
    pub fn start(&self) -> Result<StartOutcome> {
        let _writer = self.store.lock_writer();
        let mut record = self.store.load()?;

        if record.is_running {
            return Err(TimerError::AlreadyRunning);
        }

        let now = self.clock.now();
        record.start_time = Some(now);
        record.is_running = true;
        record.last_updated = Some(now);
        self.store.save(&record)?;

        info!("Timer started at {} for {}s", now, record.duration_seconds);
        Ok(StartOutcome {
            start_time: now,
            duration_seconds: record.duration_seconds,
        })
    }

    /// Freeze the countdown; returns the frozen remaining seconds
    pub fn stop(&self) -> Result<u64> {
        let _writer = self.store.lock_writer();
        let mut record = self.store.load()?;

        if !record.is_running {
            return Err(TimerError::NotRunning);
        }

        let now = self.clock.now();
        let remaining = record.remaining_at(now);
        record.remaining_seconds = remaining;
        record.is_running = false;
        record.start_time = None;
        record.last_updated = Some(now);
        self.store.save(&record)?;

        info!("Timer stopped with {}s remaining", remaining);
        Ok(remaining)
    }

    /// Reinitialize to defaults from any state; returns the new duration
    pub fn reset(&self) -> Result<u64> {
        let _writer = self.store.lock_writer();

        let record = TimerRecord::fresh(self.clock.now());
        self.store.save(&record)?;

        info!("Timer reset to {}s", record.duration_seconds);
        Ok(record.duration_seconds)
    }

    /// Change the countdown length while stopped; returns the new duration in seconds
    pub fn set_duration(&self, minutes: i64) -> Result<u64> {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
            return Err(TimerError::InvalidDuration(minutes));
        }
        let duration_seconds = minutes as u64 * 60;

        let _writer = self.store.lock_writer();
        let mut record = self.store.load()?;

        if record.is_running {
            return Err(TimerError::StillRunning);
        }

        record.duration_seconds = duration_seconds;
        record.remaining_seconds = duration_seconds;
        record.last_updated = Some(self.clock.now());
        self.store.save(&record)?;

        info!("Timer duration set to {} minutes", minutes);
        Ok(duration_seconds)
    }

    /// Compare a client's remaining time against the server's
    ///
    /// The server value is authoritative. Within tolerance only `last_updated`
    /// is touched; beyond it nothing is persisted and the drift is reported so
    /// the client can re-align.
    pub fn sync(&self, client_remaining: i64) -> Result<SyncOutcome> {
        let _writer = self.store.lock_writer();
        let mut record = self.store.load()?;

        let now = self.clock.now();
        let server_remaining = record.remaining_at(now);
        let drift = (i128::from(server_remaining) - i128::from(client_remaining)).unsigned_abs();
        let drift = u64::try_from(drift).unwrap_or(u64::MAX);

        if drift > DRIFT_TOLERANCE_SECS {
            warn!(
                "Client drifted {}s (client={}s, server={}s), sending correction",
                drift, client_remaining, server_remaining
            );
            return Ok(SyncOutcome {
                server_remaining,
                client_remaining,
                drift_seconds: Some(drift),
            });
        }

        record.last_updated = Some(now);
        self.store.save(&record)?;

        debug!("Client in sync ({}s drift)", drift);
        Ok(SyncOutcome {
            server_remaining,
            client_remaining,
            drift_seconds: None,
        })
    }
}
