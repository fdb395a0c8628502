/// Core data types for the garden monitoring service.
///
/// This module defines the shared domain model imported by all other modules:
/// parameter kinds, sensor readings, range bands and standards, plant profiles,
/// evaluation labels, pump state and the crate error type.
/// It contains no I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Parameter kinds
// ---------------------------------------------------------------------------

/// Placeholder shown for a reading field the station did not report.
pub const MISSING_VALUE: &str = "--";

/// The measurable quantities that can be evaluated against a standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Temperature,
    Humidity,
    SoilMoisture,
    Luminosity,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 4] = [
        ParameterKind::Temperature,
        ParameterKind::Humidity,
        ParameterKind::SoilMoisture,
        ParameterKind::Luminosity,
    ];

    pub fn unit(&self) -> &'static str {
        match self {
            ParameterKind::Temperature => "°C",
            ParameterKind::Humidity => "%",
            ParameterKind::SoilMoisture => "%",
            ParameterKind::Luminosity => "lx",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKind::Temperature => write!(f, "temperature"),
            ParameterKind::Humidity => write!(f, "humidity"),
            ParameterKind::SoilMoisture => write!(f, "soil_moisture"),
            ParameterKind::Luminosity => write!(f, "luminosity"),
        }
    }
}

/// Every field shown for a plant, in display order.
///
/// The four numeric fields map onto a `ParameterKind`; air quality and
/// water level are categorical and normally pass through unevaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingField {
    Temperature,
    Humidity,
    SoilMoisture,
    AirQuality,
    WaterLevel,
    Luminosity,
}

impl ReadingField {
    pub const DISPLAY_ORDER: [ReadingField; 6] = [
        ReadingField::Temperature,
        ReadingField::Humidity,
        ReadingField::SoilMoisture,
        ReadingField::AirQuality,
        ReadingField::WaterLevel,
        ReadingField::Luminosity,
    ];

    /// The evaluable quantity behind this field, if any.
    pub fn parameter_kind(&self) -> Option<ParameterKind> {
        match self {
            ReadingField::Temperature => Some(ParameterKind::Temperature),
            ReadingField::Humidity => Some(ParameterKind::Humidity),
            ReadingField::SoilMoisture => Some(ParameterKind::SoilMoisture),
            ReadingField::Luminosity => Some(ParameterKind::Luminosity),
            ReadingField::AirQuality | ReadingField::WaterLevel => None,
        }
    }

    /// Card title used by the dashboard.
    pub fn title(&self) -> &'static str {
        match self {
            ReadingField::Temperature => "Temperatura",
            ReadingField::Humidity => "Humedad Ambiental",
            ReadingField::SoilMoisture => "Humedad del Suelo",
            ReadingField::AirQuality => "Calidad del Aire",
            ReadingField::WaterLevel => "Nivel de Agua",
            ReadingField::Luminosity => "Luminocidad",
        }
    }
}

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// A single field of a sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValue {
    /// A finite number, with the text it was read from.
    Numeric { value: f64, text: String },
    Categorical(String),
}

impl SensorValue {
    /// Interprets a raw backend field. Finite numbers become `Numeric`,
    /// anything else is kept verbatim; missing or blank fields become
    /// the `--` placeholder.
    pub fn parse(raw: Option<&str>) -> SensorValue {
        let text = match raw.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return SensorValue::Categorical(MISSING_VALUE.to_string()),
        };
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => SensorValue::Numeric {
                value: v,
                text: text.to_string(),
            },
            _ => SensorValue::Categorical(text.to_string()),
        }
    }

    /// A computed number, written the way `f64` displays it.
    pub fn number(value: f64) -> SensorValue {
        SensorValue::Numeric {
            value,
            text: value.to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SensorValue::Numeric { value, .. } => Some(*value),
            SensorValue::Categorical(_) => None,
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorValue::Numeric { text, .. } => f.write_str(text),
            SensorValue::Categorical(s) => write!(f, "{}", s),
        }
    }
}

/// The wire shape of a reading as stored by the backend: every field is a
/// string, field names follow the backend's collection schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSensorReading {
    #[serde(rename = "temperatura", default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(rename = "humedad", default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(rename = "aire", default, skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<String>,
    #[serde(rename = "agua", default, skip_serializing_if = "Option::is_none")]
    pub water_level: Option<String>,
    #[serde(rename = "tierra", default, skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<String>,
    #[serde(rename = "luminocidad", default, skip_serializing_if = "Option::is_none")]
    pub luminosity: Option<String>,
    #[serde(rename = "ultrasonico", default, skip_serializing_if = "Option::is_none")]
    pub ultrasonic: Option<String>,
    #[serde(rename = "lluvia", default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A sensor reading with every field interpreted.
///
/// Readings are immutable once received; a new poll produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub temperature: SensorValue,
    pub humidity: SensorValue,
    pub soil_moisture: SensorValue,
    pub luminosity: SensorValue,
    pub air_quality: SensorValue,
    pub water_level: SensorValue,
    pub ultrasonic: Option<String>,
    pub rain: Option<String>,
    pub timestamp: Option<String>, // ISO 8601, e.g. "2025-07-02T10:00:00.000Z"
}

impl SensorReading {
    /// Value of a reading field.
    pub fn field(&self, field: ReadingField) -> &SensorValue {
        match field {
            ReadingField::Temperature => &self.temperature,
            ReadingField::Humidity => &self.humidity,
            ReadingField::SoilMoisture => &self.soil_moisture,
            ReadingField::Luminosity => &self.luminosity,
            ReadingField::AirQuality => &self.air_quality,
            ReadingField::WaterLevel => &self.water_level,
        }
    }

    pub fn value(&self, kind: ParameterKind) -> &SensorValue {
        match kind {
            ParameterKind::Temperature => &self.temperature,
            ParameterKind::Humidity => &self.humidity,
            ParameterKind::SoilMoisture => &self.soil_moisture,
            ParameterKind::Luminosity => &self.luminosity,
        }
    }
}

impl From<RawSensorReading> for SensorReading {
    fn from(raw: RawSensorReading) -> Self {
        SensorReading {
            temperature: SensorValue::parse(raw.temperature.as_deref()),
            humidity: SensorValue::parse(raw.humidity.as_deref()),
            soil_moisture: SensorValue::parse(raw.soil_moisture.as_deref()),
            luminosity: SensorValue::parse(raw.luminosity.as_deref()),
            air_quality: SensorValue::parse(raw.air_quality.as_deref()),
            water_level: SensorValue::parse(raw.water_level.as_deref()),
            ultrasonic: raw.ultrasonic,
            rain: raw.rain,
            timestamp: raw.timestamp,
        }
    }
}

impl From<&SensorReading> for RawSensorReading {
    fn from(reading: &SensorReading) -> Self {
        RawSensorReading {
            temperature: Some(reading.temperature.to_string()),
            humidity: Some(reading.humidity.to_string()),
            air_quality: Some(reading.air_quality.to_string()),
            water_level: Some(reading.water_level.to_string()),
            soil_moisture: Some(reading.soil_moisture.to_string()),
            luminosity: Some(reading.luminosity.to_string()),
            ultrasonic: reading.ultrasonic.clone(),
            rain: reading.rain.clone(),
            timestamp: reading.timestamp.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Standard types
// ---------------------------------------------------------------------------

/// A numeric band with one or two bounds.
///
/// One bound is an open-ended threshold, two bounds a closed interval.
/// Serialized as `[lower]` or `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Band {
    pub lower: f64,
    pub upper: Option<f64>,
}

impl Band {
    pub const fn closed(lower: f64, upper: f64) -> Band {
        Band { lower, upper: Some(upper) }
    }

    pub const fn at_least(lower: f64) -> Band {
        Band { lower, upper: None }
    }

    /// `true` when `value` lies inside the band: `lower <= value <= upper`,
    /// or `value >= lower` for a one-bound band.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.is_none_or(|upper| value <= upper)
    }

    /// `true` when both bands are closed intervals sharing at least one point.
    pub fn overlaps(&self, other: &Band) -> bool {
        match (self.upper, other.upper) {
            (Some(a_hi), Some(b_hi)) => self.lower <= b_hi && other.lower <= a_hi,
            _ => false,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "[{}, {}]", self.lower, upper),
            None => write!(f, "[{}]", self.lower),
        }
    }
}

impl TryFrom<Vec<f64>> for Band {
    type Error = GardenError;

    fn try_from(bounds: Vec<f64>) -> Result<Self, Self::Error> {
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(GardenError::InvalidBand(format!(
                "bounds must be finite numbers, got {:?}",
                bounds
            )));
        }
        match bounds.as_slice() {
            [lower] => Ok(Band::at_least(*lower)),
            [lower, upper] if lower <= upper => Ok(Band::closed(*lower, *upper)),
            [lower, upper] => Err(GardenError::InvalidBand(format!(
                "lower bound {} is above upper bound {}",
                lower, upper
            ))),
            _ => Err(GardenError::InvalidBand(format!(
                "expected one or two bounds, got {}",
                bounds.len()
            ))),
        }
    }
}

impl From<Band> for Vec<f64> {
    fn from(band: Band) -> Self {
        match band.upper {
            Some(upper) => vec![band.lower, upper],
            None => vec![band.lower],
        }
    }
}

/// Optimal, medium and poor bands for one measurable quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterStandard {
    pub optimal: Band,
    pub medium: Band,
    pub poor: Band,
}

impl ParameterStandard {
    /// Rejects closed bands that overlap each other, since the evaluation
    /// order would then shadow part of a band.
    pub fn validate(&self, parameter: ParameterKind) -> Result<(), GardenError> {
        let pairs = [
            ("optimal", &self.optimal, "medium", &self.medium),
            ("optimal", &self.optimal, "poor", &self.poor),
            ("medium", &self.medium, "poor", &self.poor),
        ];
        for (a_name, a, b_name, b) in pairs {
            if a.overlaps(b) {
                return Err(GardenError::InvalidStandard {
                    parameter,
                    reason: format!("{} band overlaps {} band", a_name, b_name),
                });
            }
        }
        Ok(())
    }
}

/// One standard per measurable quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardSet {
    pub temperature: ParameterStandard,
    pub humidity: ParameterStandard,
    pub soil_moisture: ParameterStandard,
    pub luminosity: ParameterStandard,
}

impl StandardSet {
    pub fn get(&self, kind: ParameterKind) -> &ParameterStandard {
        match kind {
            ParameterKind::Temperature => &self.temperature,
            ParameterKind::Humidity => &self.humidity,
            ParameterKind::SoilMoisture => &self.soil_moisture,
            ParameterKind::Luminosity => &self.luminosity,
        }
    }

    pub fn validate(&self) -> Result<(), GardenError> {
        for kind in ParameterKind::ALL {
            self.get(kind).validate(kind)?;
        }
        Ok(())
    }
}

/// Ideal scalar per quantity, evaluated with the tolerance rule.
///
/// Mirrors the backend's plant documents (`temperaturaideal`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IdealValues {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub air_quality: Option<f64>,
    #[serde(default)]
    pub water_level: Option<f64>,
    #[serde(default)]
    pub soil_moisture: Option<f64>,
    #[serde(default)]
    pub luminosity: Option<f64>,
}

impl IdealValues {
    pub fn get(&self, kind: ParameterKind) -> Option<f64> {
        match kind {
            ParameterKind::Temperature => self.temperature,
            ParameterKind::Humidity => self.humidity,
            ParameterKind::SoilMoisture => self.soil_moisture,
            ParameterKind::Luminosity => self.luminosity,
        }
    }
}

// ---------------------------------------------------------------------------
// Plant profiles
// ---------------------------------------------------------------------------

/// What a plant expects from its environment.
#[derive(Debug, Clone, PartialEq)]
pub enum PlantRequirements {
    Banded(StandardSet),
    Ideal(IdealValues),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantProfile {
    /// Backend document id, when the profile came from the catalog endpoint.
    pub id: Option<String>,
    pub name: String,
    pub requirements: PlantRequirements,
}

impl PlantProfile {
    pub fn standards(&self) -> Option<&StandardSet> {
        match &self.requirements {
            PlantRequirements::Banded(set) => Some(set),
            PlantRequirements::Ideal(_) => None,
        }
    }

    pub fn ideals(&self) -> Option<&IdealValues> {
        match &self.requirements {
            PlantRequirements::Ideal(ideals) => Some(ideals),
            PlantRequirements::Banded(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Outcome of the per-plant banded policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandRating {
    Optimal,
    Medium,
    Poor,
    /// The value fell through every band.
    NoBand,
}

/// Outcome of the fixed-threshold policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdRating {
    Low,
    Optimal,
    High,
    Unknown,
}

/// Outcome of the tolerance-percentage policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToleranceRating {
    /// Above the ideal by more than the tolerance.
    Good,
    Optimal,
    /// Below the ideal by more than the tolerance.
    Poor,
    Unknown,
}

/// Qualitative label for one reading field, consumed for display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Band(BandRating),
    Threshold(ThresholdRating),
    Tolerance(ToleranceRating),
    /// A categorical reading echoed verbatim.
    Categorical(String),
}

impl Label {
    pub fn as_str(&self) -> &str {
        match self {
            Label::Band(BandRating::Optimal) => "Óptimo",
            Label::Band(BandRating::Medium) => "Medio",
            Label::Band(BandRating::Poor) => "Malo",
            Label::Band(BandRating::NoBand) => MISSING_VALUE,
            Label::Threshold(ThresholdRating::Low) => "Baja",
            Label::Threshold(ThresholdRating::Optimal) => "Óptima",
            Label::Threshold(ThresholdRating::High) => "Alta",
            Label::Threshold(ThresholdRating::Unknown) => "Desconocida",
            Label::Tolerance(ToleranceRating::Good) => "Buena",
            Label::Tolerance(ToleranceRating::Optimal) => "Óptima",
            Label::Tolerance(ToleranceRating::Poor) => "Mala",
            Label::Tolerance(ToleranceRating::Unknown) => "Desconocida",
            Label::Categorical(value) => value,
        }
    }

    /// `true` for the sentinel a policy returns when it cannot classify.
    pub fn is_unknown(&self) -> bool {
        matches!(
            self,
            Label::Band(BandRating::NoBand)
                | Label::Threshold(ThresholdRating::Unknown)
                | Label::Tolerance(ToleranceRating::Unknown)
        )
    }

    pub fn is_optimal(&self) -> bool {
        matches!(
            self,
            Label::Band(BandRating::Optimal)
                | Label::Threshold(ThresholdRating::Optimal)
                | Label::Tolerance(ToleranceRating::Optimal)
        )
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Pump
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PumpState {
    On,
    #[default]
    Off,
}

impl PumpState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PumpState::On => "on",
            PumpState::Off => "off",
        }
    }
}

impl fmt::Display for PumpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PumpState {
    type Err = GardenError;

    /// Only the exact strings `on` and `off` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(PumpState::On),
            "off" => Ok(PumpState::Off),
            other => Err(GardenError::InvalidPumpState(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when talking to the backend, loading configuration
/// or validating plant data.
#[derive(Debug, PartialEq)]
pub enum GardenError {
    /// Non-2xx HTTP response from the backend.
    HttpError(u16),
    /// The request never produced a response (connection refused, timeout).
    Request(String),
    /// A response body or file could not be deserialized.
    ParseError(String),
    /// The backend has not stored any sensor reading yet.
    NoReadings,
    /// A named plant, user or record does not exist.
    NotFound(String),
    /// Pump state other than `on` / `off`.
    InvalidPumpState(String),
    InvalidBand(String),
    InvalidStandard { parameter: ParameterKind, reason: String },
    InvalidProfile(String),
    Config(String),
    /// A reading exists but is older than the configured freshness threshold.
    StaleData { age_minutes: u64 },
}

impl fmt::Display for GardenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GardenError::HttpError(code) => write!(f, "HTTP error: {}", code),
            GardenError::Request(msg) => write!(f, "Request failed: {}", msg),
            GardenError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            GardenError::NoReadings => write!(f, "No sensor readings stored yet"),
            GardenError::NotFound(what) => write!(f, "Not found: {}", what),
            GardenError::InvalidPumpState(state) => write!(f, "Invalid pump state: {:?}", state),
            GardenError::InvalidBand(msg) => write!(f, "Invalid band: {}", msg),
            GardenError::InvalidStandard { parameter, reason } => {
                write!(f, "Invalid {} standard: {}", parameter, reason)
            }
            GardenError::InvalidProfile(msg) => write!(f, "Invalid plant profile: {}", msg),
            GardenError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GardenError::StaleData { age_minutes } => {
                write!(f, "Stale reading: {} minutes old", age_minutes)
            }
        }
    }
}

impl std::error::Error for GardenError {}

impl From<reqwest::Error> for GardenError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => GardenError::HttpError(status.as_u16()),
            None if err.is_decode() => GardenError::ParseError(err.to_string()),
            None => GardenError::Request(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for GardenError {
    fn from(err: serde_json::Error) -> Self {
        GardenError::ParseError(err.to_string())
    }
}

impl From<toml::de::Error> for GardenError {
    fn from(err: toml::de::Error) -> Self {
        GardenError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for GardenError {
    fn from(err: std::io::Error) -> Self {
        GardenError::Config(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_value_parses_numbers_and_keeps_text() {
        assert_eq!(SensorValue::parse(Some("24.5")), SensorValue::number(24.5));
        assert_eq!(SensorValue::parse(Some(" 60 ")), SensorValue::number(60.0));
        assert_eq!(
            SensorValue::parse(Some("Bueno")),
            SensorValue::Categorical("Bueno".to_string())
        );
    }

    #[test]
    fn test_sensor_value_missing_field_is_placeholder() {
        assert_eq!(SensorValue::parse(None), SensorValue::Categorical("--".to_string()));
        assert_eq!(SensorValue::parse(Some("  ")), SensorValue::Categorical("--".to_string()));
    }

    #[test]
    fn test_sensor_value_non_finite_is_categorical() {
        assert_eq!(
            SensorValue::parse(Some("NaN")),
            SensorValue::Categorical("NaN".to_string())
        );
        assert_eq!(
            SensorValue::parse(Some("inf")),
            SensorValue::Categorical("inf".to_string())
        );
    }

    #[test]
    fn test_numeric_text_is_echoed_verbatim() {
        let value = SensorValue::parse(Some("07"));
        assert_eq!(value.as_f64(), Some(7.0));
        assert_eq!(value.to_string(), "07");
        assert_eq!(SensorValue::parse(Some(" 400.0 ")).to_string(), "400.0");

        let reading = SensorReading::from(RawSensorReading {
            air_quality: Some("400.0".to_string()),
            humidity: Some("055".to_string()),
            ..RawSensorReading::default()
        });
        let raw = RawSensorReading::from(&reading);
        assert_eq!(raw.air_quality.as_deref(), Some("400.0"));
        assert_eq!(raw.humidity.as_deref(), Some("055"));
    }

    #[test]
    fn test_raw_reading_deserializes_backend_field_names() {
        let json = r#"{
            "_id": "665f1c",
            "temperatura": "22.4",
            "humedad": "55",
            "aire": "Bueno",
            "agua": "Alto",
            "tierra": "41",
            "luminocidad": "640",
            "timestamp": "2025-07-02T10:00:00.000Z",
            "__v": 0
        }"#;
        let raw: RawSensorReading = serde_json::from_str(json).expect("valid reading JSON");
        let reading = SensorReading::from(raw);
        assert_eq!(reading.temperature, SensorValue::number(22.4));
        assert_eq!(reading.air_quality, SensorValue::Categorical("Bueno".to_string()));
        assert_eq!(reading.luminosity, SensorValue::number(640.0));
        assert_eq!(reading.rain, None);
        assert_eq!(reading.timestamp.as_deref(), Some("2025-07-02T10:00:00.000Z"));
    }

    #[test]
    fn test_band_from_bounds() {
        assert_eq!(Band::try_from(vec![18.0, 24.0]), Ok(Band::closed(18.0, 24.0)));
        assert_eq!(Band::try_from(vec![30.0]), Ok(Band::at_least(30.0)));
        assert!(Band::try_from(vec![]).is_err());
        assert!(Band::try_from(vec![1.0, 2.0, 3.0]).is_err());
        assert!(Band::try_from(vec![24.0, 18.0]).is_err());
        assert!(Band::try_from(vec![f64::NAN]).is_err());
        assert_eq!(Band::closed(18.0, 24.5).to_string(), "[18, 24.5]");
        assert_eq!(Band::at_least(30.0).to_string(), "[30]");
    }

    #[test]
    fn test_band_contains_is_inclusive() {
        let band = Band::closed(18.0, 24.0);
        assert!(band.contains(18.0));
        assert!(band.contains(24.0));
        assert!(!band.contains(24.01));
        assert!(!band.contains(17.99));

        let open = Band::at_least(100.0);
        assert!(open.contains(100.0));
        assert!(open.contains(1.0e9));
        assert!(!open.contains(99.9));
    }

    #[test]
    fn test_overlapping_standard_is_rejected() {
        let standard = ParameterStandard {
            optimal: Band::closed(18.0, 24.0),
            medium: Band::closed(15.0, 18.0),
            poor: Band::closed(25.0, 30.0),
        };
        let err = standard.validate(ParameterKind::Temperature).unwrap_err();
        assert!(matches!(err, GardenError::InvalidStandard { .. }));
    }

    #[test]
    fn test_pump_state_parsing_is_strict() {
        assert_eq!("on".parse::<PumpState>(), Ok(PumpState::On));
        assert_eq!("off".parse::<PumpState>(), Ok(PumpState::Off));
        assert_eq!(
            "ON".parse::<PumpState>(),
            Err(GardenError::InvalidPumpState("ON".to_string()))
        );
    }

    #[test]
    fn test_label_display_strings() {
        assert_eq!(Label::Band(BandRating::Optimal).to_string(), "Óptimo");
        assert_eq!(Label::Band(BandRating::NoBand).to_string(), "--");
        assert_eq!(Label::Threshold(ThresholdRating::Low).to_string(), "Baja");
        assert_eq!(Label::Tolerance(ToleranceRating::Good).to_string(), "Buena");
        assert_eq!(Label::Categorical("Alto".to_string()).to_string(), "Alto");
    }
}
