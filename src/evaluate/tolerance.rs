//! Tolerance-percentage evaluation.
//!
//! A plant defines one ideal scalar per quantity. The tolerance is
//! `ideal * percent / 100`; a reading further than that from the ideal is
//! "Buena" when above it and "Mala" when below it, otherwise "Óptima".
//!
//! A zero ideal gives a zero tolerance, so any nonzero deviation is out of
//! tolerance. Negative ideals (sub-zero temperatures) use the magnitude of
//! the tolerance.

use crate::model::{Label, SensorValue, ToleranceRating};

/// Default tolerance, in percent of the ideal.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 20.0;

/// Rates `actual` against `ideal`.
pub fn rate(actual: f64, ideal: f64, percent: f64) -> ToleranceRating {
    if actual.is_nan() || ideal.is_nan() || percent.is_nan() {
        return ToleranceRating::Unknown;
    }
    let tolerance = (ideal * percent / 100.0).abs();
    let deviation = actual - ideal;
    if deviation.abs() > tolerance {
        if deviation > 0.0 {
            ToleranceRating::Good
        } else {
            ToleranceRating::Poor
        }
    } else {
        ToleranceRating::Optimal
    }
}

/// Labels a reading field. Categorical values are echoed; a missing ideal
/// yields "Desconocida".
pub fn evaluate_tolerance(value: &SensorValue, ideal: Option<f64>, percent: f64) -> Label {
    match (value, ideal) {
        (SensorValue::Categorical(text), _) => Label::Categorical(text.clone()),
        (SensorValue::Numeric { .. }, None) => Label::Tolerance(ToleranceRating::Unknown),
        (SensorValue::Numeric { value, .. }, Some(ideal)) => Label::Tolerance(rate(*value, ideal, percent)),
    }
}

/// Compares a textual reading (air quality reported as ppm) against a
/// numeric ideal. Text that does not parse as a number yields "Desconocida".
pub fn evaluate_tolerance_text(actual: &str, ideal: Option<f64>, percent: f64) -> Label {
    let rating = match (actual.trim().parse::<f64>(), ideal) {
        (Ok(v), Some(ideal)) => rate(v, ideal, percent),
        _ => ToleranceRating::Unknown,
    };
    Label::Tolerance(rating)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
