/// Fixed-threshold evaluation.
///
/// Hardcoded cutoffs per parameter kind, independent of any plant profile:
/// below `low` is "Baja", above `high` is "Alta", anything in between
/// (inclusive) is "Óptima". The cutoffs can be overridden from `garden.toml`.

use serde::{Deserialize, Serialize};

use crate::model::{Label, ParameterKind, SensorValue, ThresholdRating};

/// Low/high cutoffs for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub low: f64,
    pub high: f64,
}

impl ThresholdRule {
    pub fn rate(&self, value: f64) -> ThresholdRating {
        if value.is_nan() {
            ThresholdRating::Unknown
        } else if value < self.low {
            ThresholdRating::Low
        } else if value > self.high {
            ThresholdRating::High
        } else {
            ThresholdRating::Optimal
        }
    }
}

/// Cutoffs for every parameter kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedThresholds {
    pub temperature: ThresholdRule,
    pub humidity: ThresholdRule,
    pub soil_moisture: ThresholdRule,
    pub luminosity: ThresholdRule,
}

impl Default for FixedThresholds {
    fn default() -> Self {
        FixedThresholds {
            temperature: ThresholdRule { low: 18.0, high: 30.0 },     // °C
            humidity: ThresholdRule { low: 40.0, high: 70.0 },        // %
            soil_moisture: ThresholdRule { low: 30.0, high: 60.0 },   // %
            luminosity: ThresholdRule { low: 200.0, high: 1000.0 },   // lx
        }
    }
}

impl FixedThresholds {
    pub fn get(&self, kind: ParameterKind) -> &ThresholdRule {
        match kind {
            ParameterKind::Temperature => &self.temperature,
            ParameterKind::Humidity => &self.humidity,
            ParameterKind::SoilMoisture => &self.soil_moisture,
            ParameterKind::Luminosity => &self.luminosity,
        }
    }

    /// Returns the first kind whose `low` is above its `high`.
    pub fn first_inverted(&self) -> Option<ParameterKind> {
        ParameterKind::ALL
            .into_iter()
            .find(|kind| !(self.get(*kind).low <= self.get(*kind).high))
    }
}

/// Labels `value` with the cutoffs for `kind`. Categorical values are echoed.
pub fn evaluate_fixed(kind: ParameterKind, value: &SensorValue, thresholds: &FixedThresholds) -> Label {
    match value {
        SensorValue::Categorical(text) => Label::Categorical(text.clone()),
        SensorValue::Numeric { value, .. } => Label::Threshold(thresholds.get(kind).rate(*value)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
