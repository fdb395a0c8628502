/// Sensor reading staleness detection.
///
/// The station posts a reading every few seconds. If the newest stored
/// reading is old, the station is offline and the dashboard is showing
/// frozen values, so the monitor flags it.
///
/// # Clock injection
/// `is_stale_at` takes `now` as a parameter so tests stay deterministic.

use chrono::{DateTime, Utc};

use crate::model::{GardenError, SensorReading};

// ---------------------------------------------------------------------------
// Staleness check
// ---------------------------------------------------------------------------

/// Age of the reading in whole minutes relative to `now`.
///
/// Fails with `ParseError` when the timestamp is missing or not RFC 3339.
pub fn age_minutes_at(reading: &SensorReading, now: DateTime<Utc>) -> Result<i64, GardenError> {
    let raw = reading
        .timestamp
        .as_deref()
        .ok_or_else(|| GardenError::ParseError("reading has no timestamp".to_string()))?;
    let taken = DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|e| GardenError::ParseError(format!("invalid timestamp '{}': {}", raw, e)))?
        .with_timezone(&Utc);
    Ok((now - taken).num_minutes())
}

/// Returns `true` if the reading is older than `max_age_minutes`.
///
///   age > max_age_minutes  →  stale
///   age == max_age_minutes →  not stale
///
/// Callers should treat an error as stale.
pub fn is_stale_at(
    reading: &SensorReading,
    max_age_minutes: u64,
    now: DateTime<Utc>,
) -> Result<bool, GardenError> {
    let age = age_minutes_at(reading, now)?;
    Ok(age > 0 && age as u64 > max_age_minutes)
}

/// Like `is_stale_at`, but reports a stale reading as `StaleData`.
pub fn ensure_fresh_at(
    reading: &SensorReading,
    max_age_minutes: u64,
    now: DateTime<Utc>,
) -> Result<(), GardenError> {
    let age = age_minutes_at(reading, now)?;
    if age > 0 && age as u64 > max_age_minutes {
        return Err(GardenError::StaleData { age_minutes: age as u64 });
    }
    Ok(())
}

/// `is_stale_at` against the real current time.
pub fn is_stale(reading: &SensorReading, max_age_minutes: u64) -> Result<bool, GardenError> {
    is_stale_at(reading, max_age_minutes, Utc::now())
}

// ---------------------------------------------------------------------------
// Polling
// ---------------------------------------------------------------------------

/// Tracks the readings a poll loop has seen.
///
/// The backend returns the same stored reading until the station posts
/// again, so a reading is only new when its timestamp changes, and a stale
/// reading is reported once rather than on every poll.
#[derive(Debug, Default)]
pub struct ReadingWatch {
    last_seen: Option<String>,
    stale_reported: Option<Option<String>>,
}

impl ReadingWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` the first time a reading's timestamp is seen. Readings
    /// without a timestamp are always new.
    pub fn observe(&mut self, reading: &SensorReading) -> bool {
        if reading.timestamp.is_some() && reading.timestamp == self.last_seen {
            return false;
        }
        self.last_seen = reading.timestamp.clone();
        true
    }

    /// The staleness error for `reading`, unless it was already returned
    /// for the same timestamp.
    pub fn stale_warning_at(
        &mut self,
        reading: &SensorReading,
        max_age_minutes: u64,
        now: DateTime<Utc>,
    ) -> Option<GardenError> {
        match ensure_fresh_at(reading, max_age_minutes, now) {
            Ok(()) => {
                self.stale_reported = None;
                None
            }
            Err(_) if self.stale_reported.as_ref() == Some(&reading.timestamp) => None,
            Err(err) => {
                self.stale_reported = Some(reading.timestamp.clone());
                Some(err)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
