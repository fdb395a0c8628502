//! Range evaluation: classifies a sensor value against a plant's
//! requirements.
//!
//! Three policies are supported, chosen by configuration:
//! - `fixed`: hardcoded cutoffs per parameter kind ("Baja" / "Óptima" / "Alta").
//! - `tolerance`: an ideal scalar per kind and a tolerance percentage
//!   ("Buena" / "Óptima" / "Mala").
//! - `banded`: the plant's optimal / medium / poor bands
//!   ("Óptimo" / "Medio" / "Malo").
//!
//! Every function here is pure and never fails: a value that cannot be
//! classified gets the policy's unknown sentinel, and categorical values
//! are echoed back verbatim.

pub mod banded;
pub mod fixed;
pub mod tolerance;

use crate::model::{
    BandRating, Label, ParameterKind, PlantRequirements, SensorValue, StandardSet,
    ThresholdRating, ToleranceRating,
};

pub use banded::evaluate_banded;
pub use fixed::{FixedThresholds, ThresholdRule, evaluate_fixed};
pub use tolerance::{DEFAULT_TOLERANCE_PERCENT, evaluate_tolerance, evaluate_tolerance_text};

/// The evaluation policy in effect for a monitoring run.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EvaluationPolicy {
    FixedThreshold(FixedThresholds),
    Tolerance { percent: f64 },
    #[default]
    Banded,
}

impl EvaluationPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            EvaluationPolicy::FixedThreshold(_) => "fixed",
            EvaluationPolicy::Tolerance { .. } => "tolerance",
            EvaluationPolicy::Banded => "banded",
        }
    }

    /// The label this policy returns when it cannot classify a value.
    pub fn unknown_label(&self) -> Label {
        match self {
            EvaluationPolicy::FixedThreshold(_) => Label::Threshold(ThresholdRating::Unknown),
            EvaluationPolicy::Tolerance { .. } => Label::Tolerance(ToleranceRating::Unknown),
            EvaluationPolicy::Banded => Label::Band(BandRating::NoBand),
        }
    }
}

/// Labels `value` for `kind` with the plant's banded standards.
pub fn evaluate(kind: ParameterKind, value: &SensorValue, standards: &StandardSet) -> Label {
    evaluate_banded(value, standards.get(kind))
}

/// Labels one numeric reading field under `policy`.
///
/// When the plant lacks what the policy needs (no bands for the banded
/// policy, no ideal for the tolerance policy) the result is the policy's
/// unknown sentinel. Categorical values always pass through.
pub fn evaluate_value(
    kind: ParameterKind,
    value: &SensorValue,
    requirements: &PlantRequirements,
    policy: &EvaluationPolicy,
) -> Label {
    if let SensorValue::Categorical(text) = value {
        return Label::Categorical(text.clone());
    }
    match (policy, requirements) {
        (EvaluationPolicy::FixedThreshold(thresholds), _) => evaluate_fixed(kind, value, thresholds),
        (EvaluationPolicy::Tolerance { percent }, PlantRequirements::Ideal(ideals)) => {
            evaluate_tolerance(value, ideals.get(kind), *percent)
        }
        (EvaluationPolicy::Banded, PlantRequirements::Banded(standards)) => {
            evaluate(kind, value, standards)
        }
        (policy, _) => policy.unknown_label(),
    }
}

/// Labels the air-quality field.
///
/// Air quality is categorical and passes through, except under the
/// tolerance policy when the plant sets an ideal ppm: then the reading is
/// compared numerically and text that is not a number yields "Desconocida".
pub fn evaluate_air_quality(
    value: &SensorValue,
    requirements: &PlantRequirements,
    policy: &EvaluationPolicy,
) -> Label {
    let ideal = match (policy, requirements) {
        (EvaluationPolicy::Tolerance { percent }, PlantRequirements::Ideal(ideals)) => {
            ideals.air_quality.map(|ideal| (ideal, *percent))
        }
        _ => None,
    };
    match (value, ideal) {
        (SensorValue::Numeric { value: v, .. }, Some((ideal, percent))) => {
            Label::Tolerance(tolerance::rate(*v, ideal, percent))
        }
        (SensorValue::Categorical(text), Some((ideal, percent))) => {
            evaluate_tolerance_text(text, Some(ideal), percent)
        }
        (value, None) => Label::Categorical(value.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
