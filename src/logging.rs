/// Structured logging for the garden monitoring service
///
/// Provides context-rich logging with component and plant identifiers,
/// timestamps, and severity levels. Supports both console output
/// and file-based logging for daemon operations.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use serde::Deserialize;

use crate::model::GardenError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Sensors,
    Plants,
    Pump,
    Evaluator,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Sensors => write!(f, "SENSOR"),
            Component::Plants => write!(f, "PLANT"),
            Component::Pump => write!(f, "PUMP"),
            Component::Evaluator => write!(f, "EVAL"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - backend has no data yet, or the station is offline
    Expected,
    /// Unexpected failure - indicates backend degradation or a payload change
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn log(&self, level: LogLevel, component: Component, plant: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format_entry(&timestamp.to_string(), level, component, plant, message);
        let plant_part = plant.map(|p| format!(" [{}]", p)).unwrap_or_default();

        // Console output
        if self.console_timestamps {
            match level {
                LogLevel::Error => eprintln!("{}", log_entry),
                LogLevel::Warning => eprintln!("   {}", log_entry),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", component, plant_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", component, plant_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => {}  // Skip debug in non-timestamp mode
            }
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

/// One log line as written to the log file.
fn format_entry(
    timestamp: &str,
    level: LogLevel,
    component: Component,
    plant: Option<&str>,
    message: &str,
) -> String {
    let plant_part = plant.map(|p| format!(" [{}]", p)).unwrap_or_default();
    format!("{} {} {}{}: {}", timestamp, level, component, plant_part, message)
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn dispatch(level: LogLevel, component: Component, plant: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, component, plant, message);
        }
    }
}

/// Log a general informational message
pub fn info(component: Component, plant: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, component, plant, message);
}

/// Log a warning message
pub fn warn(component: Component, plant: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, component, plant, message);
}

/// Log an error message
pub fn error(component: Component, plant: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, component, plant, message);
}

/// Log a debug message
pub fn debug(component: Component, plant: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, component, plant, message);
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a backend failure by its error variant
pub fn classify_backend_failure(err: &GardenError) -> FailureType {
    match err {
        // An empty sensor collection is normal right after the station is installed
        GardenError::NoReadings => FailureType::Expected,
        // 5xx means the backend itself is failing
        GardenError::HttpError(code) if (500..600).contains(code) => FailureType::Unexpected,
        // Parse errors suggest the payload shape changed
        GardenError::ParseError(_) => FailureType::Unexpected,
        // Connection refused / timeouts: backend may just be restarting
        _ => FailureType::Unknown,
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a backend failure with automatic classification
pub fn log_backend_failure(component: Component, operation: &str, err: &GardenError) {
    let error_msg = err.to_string();
    let failure_type = classify_backend_failure(err);

    let message = format!(
        "{} failed [{}]: {}",
        operation,
        failure_type,
        error_msg
    );

    match failure_type {
        FailureType::Expected => debug(component, None, &message),
        FailureType::Unexpected => error(component, None, &message),
        FailureType::Unknown => warn(component, None, &message),
    }
}

// ---------------------------------------------------------------------------
// Cycle Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of one evaluation cycle
pub fn log_cycle_summary(total: usize, healthy: usize, attention: usize, critical: usize) {
    let message = format!(
        "Cycle complete: {}/{} plants healthy, {} need attention, {} critical",
        healthy,
        total,
        attention,
        critical
    );

    if critical > 0 {
        warn(Component::Evaluator, None, &message);
    } else {
        info(Component::Evaluator, None, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_failure_classification() {
        assert_eq!(classify_backend_failure(&GardenError::NoReadings), FailureType::Expected);
        assert_eq!(classify_backend_failure(&GardenError::HttpError(500)), FailureType::Unexpected);
        assert_eq!(classify_backend_failure(&GardenError::HttpError(503)), FailureType::Unexpected);
        assert_eq!(
            classify_backend_failure(&GardenError::ParseError("missing field".to_string())),
            FailureType::Unexpected
        );
        assert_eq!(
            classify_backend_failure(&GardenError::Request("connection refused".to_string())),
            FailureType::Unknown
        );
        assert_eq!(classify_backend_failure(&GardenError::HttpError(401)), FailureType::Unknown);
        assert_eq!(classify_backend_failure(&GardenError::HttpError(404)), FailureType::Unknown);
    }

    #[test]
    fn test_classification_ignores_message_text() {
        // a message that merely mentions a server error is not one
        let err = GardenError::Request("proxy said HTTP error: 502 Parse error".to_string());
        assert_eq!(classify_backend_failure(&err), FailureType::Unknown);
        let err = GardenError::NotFound("No sensor readings here".to_string());
        assert_eq!(classify_backend_failure(&err), FailureType::Unknown);
    }

    #[test]
    fn test_file_entry_format() {
        let entry = format_entry(
            "2025-07-02 10:00:00 UTC",
            LogLevel::Warning,
            Component::Evaluator,
            Some("Menta"),
            "temperature Malo",
        );
        assert_eq!(entry, "2025-07-02 10:00:00 UTC WARN EVAL [Menta]: temperature Malo");
    }

    #[test]
    fn test_log_level_from_config_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: LogLevel,
        }
        let w: Wrapper = toml::from_str("level = \"warn\"").expect("alias should parse");
        assert_eq!(w.level, LogLevel::Warning);
        let w: Wrapper = toml::from_str("level = \"debug\"").expect("should parse");
        assert_eq!(w.level, LogLevel::Debug);
    }
}
