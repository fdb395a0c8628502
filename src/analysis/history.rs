//! In-memory reading history.
//!
//! Each poll records the reading once per monitored plant. The history is
//! bounded; when full, the oldest entry is dropped.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

use crate::model::SensorReading;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub recorded_at: DateTime<Utc>,
    pub plant: String,
    pub reading: SensorReading,
}

/// Multi-line history card for one entry.
pub fn format_entry(entry: &HistoryEntry) -> String {
    let r = &entry.reading;
    format!(
        "🕒 {}\n🌱 {}\n🌡️ Temperatura: {} °C\n💧 Humedad: {} %\n🌍 Suelo: {} %\n🌬️ Aire: {}\n🚰 Agua: {}",
        entry.recorded_at.format("%Y-%m-%d %H:%M"),
        entry.plant,
        r.temperature,
        r.humidity,
        r.soil_moisture,
        r.air_quality,
        r.water_level,
    )
}

#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        History {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, plant: &str, reading: &SensorReading, recorded_at: DateTime<Utc>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            recorded_at,
            plant: plant.to_string(),
            reading: reading.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entries for one plant, oldest first. Plant names compare
    /// case-insensitively.
    pub fn entries_for<'a>(&'a self, plant: &'a str) -> impl Iterator<Item = &'a HistoryEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.plant.eq_ignore_ascii_case(plant))
    }

    pub fn latest_for(&self, plant: &str) -> Option<&HistoryEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.plant.eq_ignore_ascii_case(plant))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
