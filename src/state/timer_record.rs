//! Persisted countdown record and the remaining-time formula

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Duration a fresh or reset timer counts down from (2 hours)
pub const DEFAULT_DURATION_SECS: u64 = 7200;
/// Shortest configurable countdown
pub const MIN_DURATION_MINUTES: i64 = 1;
/// Longest configurable countdown
pub const MAX_DURATION_MINUTES: i64 = 300;
/// Largest client/server disagreement accepted by sync without a correction
pub const DRIFT_TOLERANCE_SECS: u64 = 5;

/// The single persisted timer record
///
/// While running, `remaining_seconds` is stale: the live value is always
/// derived from `start_time` through [`TimerRecord::remaining_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRecord {
    /// Instant the current run began, `None` while stopped
    #[serde(default, with = "iso_instant")]
    pub start_time: Option<DateTime<Utc>>,
    /// Configured countdown length
    pub duration_seconds: u64,
    /// Frozen remaining time, authoritative only while stopped
    pub remaining_seconds: u64,
    pub is_running: bool,
    /// Instant of the last mutation or accepted sync
    #[serde(default, with = "iso_instant")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl TimerRecord {
    /// Stopped record with the default duration, stamped at `now`
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            last_updated: Some(now),
            ..Self::default()
        }
    }

    /// Remaining whole seconds at `now`
    pub fn remaining_at(&self, now: DateTime<Utc>) -> u64 {
        match (self.is_running, self.start_time) {
            (true, Some(started)) => {
                // a start instant in the future counts as nothing elapsed
                let elapsed_ms = (now - started).num_milliseconds().max(0);
                let total_ms = i64::try_from(self.duration_seconds)
                    .unwrap_or(i64::MAX)
                    .saturating_mul(1000);
                let left_ms = total_ms.saturating_sub(elapsed_ms).max(0);
                (left_ms / 1000) as u64
            }
            _ => self.remaining_seconds,
        }
    }

    /// Whether `is_running` agrees with the presence of `start_time`
    pub fn is_consistent(&self) -> bool {
        self.is_running == self.start_time.is_some()
    }

    /// Restore the `is_running` invariant, trusting `start_time`
    pub fn normalized(mut self) -> Self {
        if !self.is_consistent() {
            tracing::warn!(
                "Timer record inconsistent (is_running={}, start_time={:?}), treating as {}",
                self.is_running,
                self.start_time,
                if self.start_time.is_some() { "running" } else { "stopped" }
            );
            self.is_running = self.start_time.is_some();
        }
        self
    }
}

impl Default for TimerRecord {
    fn default() -> Self {
        Self {
            start_time: None,
            duration_seconds: DEFAULT_DURATION_SECS,
            remaining_seconds: DEFAULT_DURATION_SECS,
            is_running: false,
            last_updated: None,
        }
    }
}

/// ISO-8601 encoding for optional instants
///
/// Writes RFC 3339 UTC with as many subsecond digits as the instant needs,
/// so nanosecond instants round-trip exactly. Reads RFC 3339, or a naive
/// timestamp without offset which is taken as host local time.
pub mod iso_instant {
    use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(at) => serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| parse(&s).map_err(de::Error::custom)).transpose()
    }

    /// Parse an RFC 3339 or naive local ISO-8601 timestamp
    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Ok(at.with_timezone(&Utc));
        }

        let naive: NaiveDateTime = raw
            .parse()
            .map_err(|e| format!("invalid timestamp {:?}: {}", raw, e))?;

        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|at| at.with_timezone(&Utc))
            .ok_or_else(|| format!("timestamp {:?} does not exist in the local time zone", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, NaiveDate, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 20, 18, 0, 0).unwrap()
    }

    fn running(duration_seconds: u64, started: DateTime<Utc>) -> TimerRecord {
        TimerRecord {
            start_time: Some(started),
            duration_seconds,
            remaining_seconds: duration_seconds,
            is_running: true,
            last_updated: Some(started),
        }
    }

    #[test]
    fn test_default_record() {
        let record = TimerRecord::default();
        assert!(!record.is_running);
        assert_eq!(record.start_time, None);
        assert_eq!(record.duration_seconds, 7200);
        assert_eq!(record.remaining_seconds, 7200);
        assert_eq!(record.last_updated, None);

        let fresh = TimerRecord::fresh(t0());
        assert_eq!(fresh.last_updated, Some(t0()));
        assert_eq!(fresh.remaining_seconds, DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_stopped_record_returns_frozen_value() {
        let record = TimerRecord {
            remaining_seconds: 1234,
            ..TimerRecord::default()
        };
        assert_eq!(record.remaining_at(t0()), 1234);
        assert_eq!(record.remaining_at(t0() + Duration::days(3)), 1234);
    }

    #[test]
    fn test_running_record_counts_down_and_truncates() {
        let record = running(600, t0());
        assert_eq!(record.remaining_at(t0()), 600);
        assert_eq!(record.remaining_at(t0() + Duration::milliseconds(999)), 599);
        assert_eq!(record.remaining_at(t0() + Duration::seconds(10)), 590);
        assert_eq!(record.remaining_at(t0() + Duration::milliseconds(599_001)), 0);
    }

    #[test]
    fn test_running_record_never_goes_negative() {
        let record = running(60, t0());
        assert_eq!(record.remaining_at(t0() + Duration::seconds(60)), 0);
        assert_eq!(record.remaining_at(t0() + Duration::hours(5)), 0);
    }

    #[test]
    fn test_future_start_counts_as_no_elapsed_time() {
        let record = running(60, t0());
        assert_eq!(record.remaining_at(t0() - Duration::seconds(30)), 60);
    }

    #[test]
    fn test_normalized_trusts_start_time() {
        let orphan_flag = TimerRecord {
            is_running: true,
            ..TimerRecord::default()
        };
        assert!(!orphan_flag.is_consistent());
        assert!(!orphan_flag.normalized().is_running);

        let orphan_start = TimerRecord {
            start_time: Some(t0()),
            ..TimerRecord::default()
        };
        let fixed = orphan_start.normalized();
        assert!(fixed.is_running);
        assert!(fixed.is_consistent());
    }

    #[test]
    fn test_json_layout() {
        let record = running(7200, t0());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["start_time"], "2026-02-20T18:00:00Z");
        assert_eq!(json["last_updated"], "2026-02-20T18:00:00Z");
        assert_eq!(json["duration_seconds"], 7200);
        assert_eq!(json["is_running"], true);

        let stopped = serde_json::to_value(TimerRecord::default()).unwrap();
        assert!(stopped["start_time"].is_null());
        assert!(stopped["last_updated"].is_null());
    }

    #[test]
    fn test_subsecond_instants_survive_json() {
        let at = t0() + Duration::nanoseconds(123_456_789);
        let record = running(7200, at);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("2026-02-20T18:00:00.123456789Z"));
        let decoded: TimerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_reads_naive_local_timestamps() {
        let json = r#"{
            "start_time": "2026-02-20T18:00:00.250000",
            "duration_seconds": 7200,
            "remaining_seconds": 7200,
            "is_running": true,
            "last_updated": "2026-02-20T18:00:00"
        }"#;
        let record: TimerRecord = serde_json::from_str(json).unwrap();

        let naive = NaiveDate::from_ymd_opt(2026, 2, 20)
            .unwrap()
            .and_hms_milli_opt(18, 0, 0, 250)
            .unwrap();
        let expected = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(record.start_time, Some(expected));
        assert!(record.last_updated.is_some());
    }

    #[test]
    fn test_missing_last_updated_defaults_to_none() {
        let json = r#"{
            "start_time": null,
            "duration_seconds": 600,
            "remaining_seconds": 42,
            "is_running": false
        }"#;
        let record: TimerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.last_updated, None);
        assert_eq!(record.remaining_seconds, 42);
    }

    #[test]
    fn test_rejects_garbage_timestamp() {
        assert!(iso_instant::parse("yesterday at noon").is_err());
    }
}
