//! Evaluation of a full sensor reading for one plant.

use crate::alert::thresholds::{AlertSeverity, severity_of};
use crate::evaluate::{EvaluationPolicy, evaluate_air_quality, evaluate_value};
use crate::model::{Label, PlantProfile, ReadingField, SensorReading, SensorValue};

/// One evaluated field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStatus {
    pub field: ReadingField,
    pub value: SensorValue,
    pub label: Label,
}

impl FieldStatus {
    /// Dashboard card text, e.g. `Temperatura: 22.4 °C (Óptimo)`.
    pub fn display_line(&self) -> String {
        let value = match (&self.value, self.field.parameter_kind()) {
            (SensorValue::Numeric { text, .. }, Some(kind)) => format!("{} {}", text, kind.unit()),
            (value, _) => value.to_string(),
        };
        match self.label {
            Label::Categorical(_) => format!("{}: {}", self.field.title(), value),
            _ => format!("{}: {} ({})", self.field.title(), value, self.label),
        }
    }
}

/// Every field of one reading, labelled for one plant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantStatus {
    pub plant: String,
    pub policy: &'static str,
    /// In `ReadingField::DISPLAY_ORDER`.
    pub fields: Vec<FieldStatus>,
}

impl PlantStatus {
    pub fn label(&self, field: ReadingField) -> Option<&Label> {
        self.fields.iter().find(|f| f.field == field).map(|f| &f.label)
    }

    /// Fields whose value could not be classified.
    pub fn unknown_fields(&self) -> Vec<ReadingField> {
        self.fields
            .iter()
            .filter(|f| f.label.is_unknown())
            .map(|f| f.field)
            .collect()
    }

    pub fn worst_severity(&self) -> Option<AlertSeverity> {
        self.fields.iter().filter_map(|f| severity_of(&f.label)).max()
    }

    pub fn is_healthy(&self) -> bool {
        self.worst_severity().is_none()
    }
}

/// Labels every field of `reading` for `profile` under `policy`.
///
/// Water level always passes through; air quality is only compared
/// numerically under the tolerance policy.
pub fn evaluate_plant(
    profile: &PlantProfile,
    reading: &SensorReading,
    policy: &EvaluationPolicy,
) -> PlantStatus {
    let fields = ReadingField::DISPLAY_ORDER
        .iter()
        .map(|&field| {
            let value = reading.field(field).clone();
            let label = match field.parameter_kind() {
                Some(kind) => evaluate_value(kind, &value, &profile.requirements, policy),
                None if field == ReadingField::AirQuality => {
                    evaluate_air_quality(&value, &profile.requirements, policy)
                }
                None => Label::Categorical(value.to_string()),
            };
            FieldStatus { field, value, label }
        })
        .collect();

    PlantStatus {
        plant: profile.name.clone(),
        policy: policy.name(),
        fields,
    }
}

/// Evaluates one reading for every plant in the catalog.
pub fn evaluate_all(
    profiles: &[PlantProfile],
    reading: &SensorReading,
    policy: &EvaluationPolicy,
) -> Vec<PlantStatus> {
    profiles
        .iter()
        .map(|profile| evaluate_plant(profile, reading, policy))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
