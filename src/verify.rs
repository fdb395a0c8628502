//! Backend Verification Module
//!
//! Checks the configured garden backend endpoint by endpoint: is it
//! reachable, and does it return a payload this crate can parse?
//!
//! Run this after pointing the monitor at a new backend.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::ingest::backend::{
    BackendClient, PATH_LATEST_READING, PATH_PLANTS, PATH_PUMP, PATH_USER_PLANTS,
};
use crate::model::{GardenError, PlantProfile, PumpState, SensorReading, SensorValue};

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub base_url: String,
    pub results: Vec<EndpointVerification>,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub working: usize,
    pub failed: usize,
}

impl VerificationSummary {
    pub fn from_results(results: &[EndpointVerification]) -> Self {
        let failed = results
            .iter()
            .filter(|r| r.status == VerificationStatus::Failed)
            .count();
        VerificationSummary {
            total: results.len(),
            working: results.len() - failed,
            failed,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.working as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointVerification {
    pub endpoint: String,
    pub status: VerificationStatus,
    pub reachable: bool,
    /// What the payload contained, when it parsed.
    pub detail: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    Success,
    PartialSuccess,
    Failed,
}

impl EndpointVerification {
    fn failed(endpoint: &str, err: &GardenError) -> Self {
        EndpointVerification {
            endpoint: endpoint.to_string(),
            status: VerificationStatus::Failed,
            // an HTTP status or a bad payload still means the server answered
            reachable: matches!(err, GardenError::HttpError(_) | GardenError::ParseError(_)),
            detail: None,
            error_message: Some(err.to_string()),
        }
    }

    fn reached(endpoint: &str, status: VerificationStatus, detail: String) -> Self {
        EndpointVerification {
            endpoint: endpoint.to_string(),
            status,
            reachable: true,
            detail: Some(detail),
            error_message: None,
        }
    }
}

// ============================================================================
// Per-endpoint checks
// ============================================================================

/// Judges a `/sensores/ultimo` result. An empty collection or a reading
/// without any numeric field is only a partial success.
pub fn check_latest_reading(result: Result<SensorReading, GardenError>) -> EndpointVerification {
    match result {
        Ok(reading) => {
            let numeric = [
                &reading.temperature,
                &reading.humidity,
                &reading.soil_moisture,
                &reading.luminosity,
            ]
            .into_iter()
            .filter(|v| matches!(v, SensorValue::Numeric { .. }))
            .count();
            let detail = format!(
                "{} numeric fields, timestamp {}",
                numeric,
                reading.timestamp.as_deref().unwrap_or("missing")
            );
            let status = if numeric > 0 {
                VerificationStatus::Success
            } else {
                VerificationStatus::PartialSuccess
            };
            EndpointVerification::reached(PATH_LATEST_READING, status, detail)
        }
        Err(GardenError::NoReadings) => EndpointVerification::reached(
            PATH_LATEST_READING,
            VerificationStatus::PartialSuccess,
            "no readings stored yet".to_string(),
        ),
        Err(e) => EndpointVerification::failed(PATH_LATEST_READING, &e),
    }
}

/// Judges a plant catalog result. An empty catalog is a partial success.
pub fn check_catalog(endpoint: &str, result: Result<Vec<PlantProfile>, GardenError>) -> EndpointVerification {
    match result {
        Ok(plants) if plants.is_empty() => EndpointVerification::reached(
            endpoint,
            VerificationStatus::PartialSuccess,
            "catalog is empty".to_string(),
        ),
        Ok(plants) => {
            let names: Vec<&str> = plants.iter().map(|p| p.name.as_str()).collect();
            EndpointVerification::reached(
                endpoint,
                VerificationStatus::Success,
                format!("{} plants: {}", plants.len(), names.join(", ")),
            )
        }
        Err(e) => EndpointVerification::failed(endpoint, &e),
    }
}

pub fn check_pump(result: Result<PumpState, GardenError>) -> EndpointVerification {
    match result {
        Ok(state) => EndpointVerification::reached(
            PATH_PUMP,
            VerificationStatus::Success,
            format!("pump is {}", state),
        ),
        Err(e) => EndpointVerification::failed(PATH_PUMP, &e),
    }
}

/// Runs every read-only check against `client`. The pump is never toggled.
pub fn verify_endpoints(client: &BackendClient, user_id: Option<&str>) -> Vec<EndpointVerification> {
    let mut results = vec![
        check_latest_reading(client.latest_reading()),
        check_catalog(PATH_PLANTS, client.plants()),
    ];
    if let Some(user) = user_id {
        let endpoint = format!("{}/{}", PATH_USER_PLANTS, user);
        results.push(check_catalog(&endpoint, client.user_plants(user)));
    }
    results.push(check_pump(client.pump_state()));
    results
}

// ============================================================================
// Full run
// ============================================================================

/// Checks every endpoint of the configured backend. Prints nothing, so the
/// report can be emitted as JSON on its own.
pub fn run_full_verification(config: &MonitorConfig) -> Result<VerificationReport, GardenError> {
    let client = BackendClient::from_config(&config.backend)?;
    let results = verify_endpoints(&client, config.backend.user_id.as_deref());

    Ok(VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        base_url: client.base_url().to_string(),
        summary: VerificationSummary::from_results(&results),
        results,
    })
}

/// One line per endpoint, for terminal output.
pub fn progress_lines(report: &VerificationReport) -> Vec<String> {
    report
        .results
        .iter()
        .map(|result| match result.status {
            VerificationStatus::Success => {
                format!("  {} ... ✓ OK ({})", result.endpoint, result.detail.as_deref().unwrap_or(""))
            }
            VerificationStatus::PartialSuccess => {
                format!("  {} ... ⚠ Partial ({})", result.endpoint, result.detail.as_deref().unwrap_or(""))
            }
            VerificationStatus::Failed => format!(
                "  {} ... ✗ FAILED: {}",
                result.endpoint,
                result.error_message.as_deref().unwrap_or("Unknown")
            ),
        })
        .collect()
}

pub fn print_progress(report: &VerificationReport) {
    println!("🔍 Verified garden backend at {}", report.base_url);
    for line in progress_lines(report) {
        println!("{}", line);
    }
}

pub fn print_summary(report: &VerificationReport) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("📊 VERIFICATION SUMMARY");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Backend:    {}", report.base_url);
    println!("Endpoints:  {}/{} working  ({} failed)",
        report.summary.working, report.summary.total, report.summary.failed);
    println!();
    println!("Overall Success Rate: {:.1}%", report.summary.success_rate());
    println!("═══════════════════════════════════════════════════════════\n");

    let failed: Vec<&EndpointVerification> = report
        .results
        .iter()
        .filter(|r| r.status == VerificationStatus::Failed)
        .collect();
    if !failed.is_empty() {
        println!("❌ Failed endpoints:");
        for r in failed {
            println!("  - {}: {}", r.endpoint, r.error_message.as_deref().unwrap_or("Unknown"));
        }
        println!();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::backend::parse_sensor_reading;
    use crate::plants::builtin_profiles;

    #[test]
    fn test_reading_with_values_is_success() {
        let reading = parse_sensor_reading(r#"{"temperatura": "22", "timestamp": "2025-07-02T10:00:00Z"}"#)
            .expect("valid reading");
        let result = check_latest_reading(Ok(reading));
        assert_eq!(result.status, VerificationStatus::Success);
        assert!(result.reachable);
        assert_eq!(result.detail.as_deref(), Some("1 numeric fields, timestamp 2025-07-02T10:00:00Z"));
    }

    #[test]
    fn test_empty_collection_is_partial() {
        let result = check_latest_reading(Err(GardenError::NoReadings));
        assert_eq!(result.status, VerificationStatus::PartialSuccess);
        assert!(result.reachable);
    }

    #[test]
    fn test_reading_without_numbers_is_partial() {
        let reading = parse_sensor_reading(r#"{"aire": "Bueno"}"#).expect("valid reading");
        assert_eq!(check_latest_reading(Ok(reading)).status, VerificationStatus::PartialSuccess);
    }

    #[test]
    fn test_connection_failure_is_unreachable() {
        let result = check_pump(Err(GardenError::Request("connection refused".to_string())));
        assert_eq!(result.status, VerificationStatus::Failed);
        assert!(!result.reachable);

        let result = check_pump(Err(GardenError::HttpError(500)));
        assert!(result.reachable);
        assert_eq!(result.error_message.as_deref(), Some("HTTP error: 500"));
    }

    #[test]
    fn test_catalog_checks() {
        assert_eq!(check_catalog(PATH_PLANTS, Ok(Vec::new())).status, VerificationStatus::PartialSuccess);
        let result = check_catalog(PATH_PLANTS, Ok(builtin_profiles()));
        assert_eq!(result.status, VerificationStatus::Success);
        assert_eq!(result.detail.as_deref(), Some("3 plants: Menta, Lavanda, Albahaca"));
    }

    #[test]
    fn test_summary_counts_partial_as_working() {
        let results = vec![
            check_latest_reading(Err(GardenError::NoReadings)),
            check_catalog(PATH_PLANTS, Ok(builtin_profiles())),
            check_pump(Err(GardenError::HttpError(404))),
        ];
        let summary = VerificationSummary::from_results(&results);
        assert_eq!(summary, VerificationSummary { total: 3, working: 2, failed: 1 });
        assert!((summary.success_rate() - 66.666).abs() < 0.01);
        assert_eq!(VerificationSummary::default().success_rate(), 0.0);
    }

    #[test]
    fn test_progress_lines() {
        let results = vec![
            check_latest_reading(Err(GardenError::NoReadings)),
            check_pump(Err(GardenError::HttpError(503))),
        ];
        let report = VerificationReport {
            timestamp: "2025-07-02T10:00:00+00:00".to_string(),
            base_url: "http://localhost:3000".to_string(),
            summary: VerificationSummary::from_results(&results),
            results,
        };
        assert_eq!(
            progress_lines(&report),
            vec![
                "  /sensores/ultimo ... ⚠ Partial (no readings stored yet)".to_string(),
                "  /bomba ... ✗ FAILED: HTTP error: 503".to_string(),
            ]
        );
    }
}
