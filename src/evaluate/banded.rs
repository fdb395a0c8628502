//! Per-plant banded evaluation.
//!
//! Each plant carries an optimal, medium and poor band per parameter. Bands
//! are tested poor first, then medium, then optimal; the first match wins.
//! A value that falls through every band gets the `--` sentinel, which is
//! how gaps between adjoining bands (e.g. medium `[15, 17]`, optimal
//! `[18, 24]` and a reading of 17.5) surface to the dashboard.

use crate::model::{Band, BandRating, Label, ParameterStandard, SensorValue};

/// Labels `value` against one parameter's standard.
///
/// Categorical values are echoed back unchanged.
pub fn evaluate_banded(value: &SensorValue, standard: &ParameterStandard) -> Label {
    match value {
        SensorValue::Categorical(text) => Label::Categorical(text.clone()),
        SensorValue::Numeric { value, .. } => Label::Band(rate(*value, standard)),
    }
}

/// Rates a numeric value. Never panics; NaN falls through to `NoBand`.
pub fn rate(value: f64, standard: &ParameterStandard) -> BandRating {
    if value.is_nan() {
        return BandRating::NoBand;
    }
    if in_poor_band(value, &standard.poor) {
        BandRating::Poor
    } else if standard.medium.contains(value) {
        BandRating::Medium
    } else if standard.optimal.contains(value) {
        BandRating::Optimal
    } else {
        BandRating::NoBand
    }
}

/// A one-bound poor band is a floor: anything below it is poor.
fn in_poor_band(value: f64, band: &Band) -> bool {
    match band.upper {
        Some(_) => band.contains(value),
        None => value < band.lower,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
