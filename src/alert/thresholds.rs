//! Plant condition alerts.
//!
//! Turns an evaluated `PlantStatus` into alerts. Anything short of optimal
//! but still acceptable ("Medio", "Buena") needs attention; values in the
//! poor band or outside fixed thresholds are critical. Unclassifiable
//! values never alert.

use std::fmt;

use crate::analysis::status::PlantStatus;
use crate::model::{BandRating, Label, ReadingField, ThresholdRating, ToleranceRating};

/// Alert severity levels, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    Attention,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Attention => write!(f, "ATTENTION"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// An alert raised for one field of one plant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantAlert {
    pub plant: String,
    pub field: ReadingField,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Severity implied by a label, `None` when it needs no alert.
pub fn severity_of(label: &Label) -> Option<AlertSeverity> {
    match label {
        Label::Band(BandRating::Medium) | Label::Tolerance(ToleranceRating::Good) => {
            Some(AlertSeverity::Attention)
        }
        Label::Band(BandRating::Poor)
        | Label::Threshold(ThresholdRating::Low)
        | Label::Threshold(ThresholdRating::High)
        | Label::Tolerance(ToleranceRating::Poor) => Some(AlertSeverity::Critical),
        _ => None,
    }
}

/// Collects one alert per field that is not in good condition.
pub fn check_plant_status(status: &PlantStatus) -> Vec<PlantAlert> {
    status
        .fields
        .iter()
        .filter_map(|f| {
            severity_of(&f.label).map(|severity| PlantAlert {
                plant: status.plant.clone(),
                field: f.field,
                severity,
                message: format!("{} {} ({})", f.field.title(), f.value, f.label),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::status::evaluate_plant;
    use crate::evaluate::{EvaluationPolicy, FixedThresholds};
    use crate::model::{RawSensorReading, SensorReading};
    use crate::plants::find_plant;

    fn mint_status(temp: &str, humidity: &str, policy: &EvaluationPolicy) -> PlantStatus {
        let reading = SensorReading::from(RawSensorReading {
            temperature: Some(temp.to_string()),
            humidity: Some(humidity.to_string()),
            soil_moisture: Some("40".to_string()),
            luminosity: Some("600".to_string()),
            air_quality: Some("Bueno".to_string()),
            water_level: Some("Alto".to_string()),
            ..RawSensorReading::default()
        });
        let profile = find_plant("Menta").expect("Menta is built in").to_profile();
        evaluate_plant(&profile, &reading, policy)
    }

    #[test]
    fn test_severity_ordering() {
        assert!(AlertSeverity::Attention < AlertSeverity::Critical);
    }

    #[test]
    fn test_optimal_and_unknown_labels_do_not_alert() {
        assert_eq!(severity_of(&Label::Band(BandRating::Optimal)), None);
        assert_eq!(severity_of(&Label::Band(BandRating::NoBand)), None);
        assert_eq!(severity_of(&Label::Tolerance(ToleranceRating::Unknown)), None);
        assert_eq!(severity_of(&Label::Categorical("Malo".to_string())), None);
    }

    #[test]
    fn test_healthy_plant_has_no_alerts() {
        let status = mint_status("20", "50", &EvaluationPolicy::Banded);
        assert!(check_plant_status(&status).is_empty());
    }

    #[test]
    fn test_medium_and_poor_bands() {
        let status = mint_status("16", "65", &EvaluationPolicy::Banded);
        let alerts = check_plant_status(&status);
        assert_eq!(alerts.len(), 2);

        assert_eq!(alerts[0].field, ReadingField::Temperature);
        assert_eq!(alerts[0].severity, AlertSeverity::Attention);
        assert_eq!(alerts[0].message, "Temperatura 16 (Medio)");

        assert_eq!(alerts[1].field, ReadingField::Humidity);
        assert_eq!(alerts[1].severity, AlertSeverity::Critical);
        assert_eq!(alerts[1].plant, "Menta");
    }

    #[test]
    fn test_fixed_threshold_breach_is_critical() {
        let policy = EvaluationPolicy::FixedThreshold(FixedThresholds::default());
        let status = mint_status("31", "50", &policy);
        let alerts = check_plant_status(&status);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[0].message, "Temperatura 31 (Alta)");
    }
}
