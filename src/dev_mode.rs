/// Development mode sensor simulator
///
/// When no sensor station is attached, generates plausible readings so the
/// evaluator, alerts and dashboard can be exercised end to end. Readings
/// can be evaluated locally or posted to the backend as the station would.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;

use crate::model::{SensorReading, SensorValue};

pub const AIR_QUALITY_LEVELS: [&str; 3] = ["Bueno", "Regular", "Malo"];
pub const WATER_LEVELS: [&str; 3] = ["Alto", "Medio", "Bajo"];

/// Value ranges for simulated readings, half-open `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulator {
    pub temperature: (f64, f64),
    pub humidity: (f64, f64),
    pub soil_moisture: (f64, f64),
    pub luminosity: (f64, f64),
}

impl Default for Simulator {
    fn default() -> Self {
        Simulator {
            temperature: (18.0, 33.0),
            humidity: (20.0, 100.0),
            soil_moisture: (20.0, 80.0),
            luminosity: (100.0, 1000.0),
        }
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a reading stamped with the current time.
    pub fn next_reading<R: Rng>(&self, rng: &mut R) -> SensorReading {
        self.next_reading_at(rng, Utc::now())
    }

    /// Generates a reading stamped with `now`.
    pub fn next_reading_at<R: Rng>(&self, rng: &mut R, now: DateTime<Utc>) -> SensorReading {
        let temperature = (rng.random_range(self.temperature.0..self.temperature.1) * 10.0).round() / 10.0;
        let humidity = rng.random_range(self.humidity.0..self.humidity.1).floor();
        let soil = rng.random_range(self.soil_moisture.0..self.soil_moisture.1).floor();
        let lux = rng.random_range(self.luminosity.0..self.luminosity.1).floor();
        let air = AIR_QUALITY_LEVELS[rng.random_range(0..AIR_QUALITY_LEVELS.len())];
        let water = WATER_LEVELS[rng.random_range(0..WATER_LEVELS.len())];

        SensorReading {
            temperature: SensorValue::number(temperature),
            humidity: SensorValue::number(humidity),
            soil_moisture: SensorValue::number(soil),
            luminosity: SensorValue::number(lux),
            air_quality: SensorValue::Categorical(air.to_string()),
            water_level: SensorValue::Categorical(water.to_string()),
            ultrasonic: None,
            rain: None,
            timestamp: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn in_range(value: &SensorValue, (min, max): (f64, f64)) -> bool {
        value.as_f64().is_some_and(|v| v >= min && v <= max)
    }

    #[test]
    fn test_readings_stay_in_range() {
        let sim = Simulator::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let r = sim.next_reading(&mut rng);
            assert!(in_range(&r.temperature, sim.temperature), "{:?}", r.temperature);
            assert!(in_range(&r.humidity, sim.humidity), "{:?}", r.humidity);
            assert!(in_range(&r.soil_moisture, sim.soil_moisture), "{:?}", r.soil_moisture);
            assert!(in_range(&r.luminosity, sim.luminosity), "{:?}", r.luminosity);
            assert!(AIR_QUALITY_LEVELS.contains(&r.air_quality.to_string().as_str()));
            assert!(WATER_LEVELS.contains(&r.water_level.to_string().as_str()));
        }
    }

    #[test]
    fn test_temperature_has_one_decimal_and_others_are_whole() {
        let sim = Simulator::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let r = sim.next_reading(&mut rng);
            let t = r.temperature.as_f64().expect("numeric");
            assert!(((t * 10.0).round() - t * 10.0).abs() < 1e-9);
            let h = r.humidity.as_f64().expect("numeric");
            assert_eq!(h, h.trunc());
        }
    }

    #[test]
    fn test_same_seed_same_readings() {
        let sim = Simulator::new();
        let now = Utc.with_ymd_and_hms(2025, 7, 2, 12, 0, 0).unwrap();
        let a = sim.next_reading_at(&mut StdRng::seed_from_u64(3), now);
        let b = sim.next_reading_at(&mut StdRng::seed_from_u64(3), now);
        assert_eq!(a, b);
        assert_eq!(a.timestamp.as_deref(), Some("2025-07-02T12:00:00.000Z"));
    }

    #[test]
    fn test_simulated_reading_is_fresh() {
        let r = Simulator::new().next_reading(&mut StdRng::seed_from_u64(1));
        assert_eq!(crate::alert::stalenesses::is_stale(&r, 1), Ok(false));
    }
}
