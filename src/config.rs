//! Service configuration.
//!
//! Settings come from `garden.toml` (path overridable with `GARDEN_CONFIG`),
//! then environment variables, loaded from `.env` when present, override
//! individual values. Every field has a default, so running without a
//! config file is valid.
//!
//! ```toml
//! [backend]
//! api_url = "http://192.168.100.10:3000"
//!
//! [monitor]
//! poll_interval_secs = 5
//!
//! [evaluation]
//! policy = "banded"          # "fixed" | "tolerance" | "banded"
//! tolerance_percent = 20.0
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::evaluate::{DEFAULT_TOLERANCE_PERCENT, EvaluationPolicy, FixedThresholds};
use crate::logging::LogLevel;
use crate::model::GardenError;

pub const DEFAULT_CONFIG_PATH: &str = "./garden.toml";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub api_url: String,
    pub timeout_secs: u64,
    /// Bearer token for the per-user endpoints. Normally set via `GARDEN_AUTH_TOKEN`.
    pub auth_token: Option<String>,
    /// Restricts monitoring to this user's plants when set.
    pub user_id: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            api_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
            auth_token: None,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub poll_interval_secs: u64,
    pub stale_after_minutes: u64,
    pub history_capacity: usize,
    /// TOML plant catalog; the built-in plants are used when unset.
    pub plants_file: Option<String>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        MonitorSettings {
            poll_interval_secs: 5,
            stale_after_minutes: 10,
            history_capacity: 200,
            plants_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Fixed,
    Tolerance,
    Banded,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub policy: PolicyKind,
    pub tolerance_percent: f64,
    pub thresholds: FixedThresholds,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            policy: PolicyKind::Banded,
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            thresholds: FixedThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Info,
            file: None,
            console_timestamps: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub backend: BackendConfig,
    pub monitor: MonitorSettings,
    pub evaluation: EvaluationConfig,
    pub logging: LoggingConfig,
}

impl MonitorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, GardenError> {
        let config: MonitorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &str) -> Result<Self, GardenError> {
        if !Path::new(path).exists() {
            return Ok(MonitorConfig::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| GardenError::Config(format!("cannot read {}: {}", path, e)))?;
        Self::from_toml_str(&text)
    }

    /// Loads `.env`, then the config file named by `GARDEN_CONFIG` (or
    /// `./garden.toml`), then applies environment overrides.
    pub fn from_env() -> Result<Self, GardenError> {
        dotenv::dotenv().ok();
        let path = std::env::var("GARDEN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load_or_default(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies `GARDEN_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), GardenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GARDEN_API_URL") {
            self.backend.api_url = url;
        }
        if let Some(secs) = lookup("GARDEN_POLL_SECS") {
            self.monitor.poll_interval_secs = secs
                .trim()
                .parse()
                .map_err(|_| GardenError::Config(format!("GARDEN_POLL_SECS is not a number: {}", secs)))?;
        }
        if let Some(token) = lookup("GARDEN_AUTH_TOKEN") {
            self.backend.auth_token = Some(token);
        }
        if let Some(user) = lookup("GARDEN_USER_ID") {
            self.backend.user_id = Some(user);
        }
        if let Some(file) = lookup("GARDEN_LOG_FILE") {
            self.logging.file = Some(file);
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), GardenError> {
        let url = &self.backend.api_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(GardenError::Config(format!("api_url must be an http(s) URL, got '{}'", url)));
        }
        if self.monitor.poll_interval_secs == 0 {
            return Err(GardenError::Config("poll_interval_secs must be at least 1".to_string()));
        }
        if self.monitor.history_capacity == 0 {
            return Err(GardenError::Config("history_capacity must be at least 1".to_string()));
        }
        let pct = self.evaluation.tolerance_percent;
        if !pct.is_finite() || pct < 0.0 {
            return Err(GardenError::Config(format!("tolerance_percent must be >= 0, got {}", pct)));
        }
        if let Some(kind) = self.evaluation.thresholds.first_inverted() {
            return Err(GardenError::Config(format!("{} threshold has low above high", kind)));
        }
        Ok(())
    }

    /// The evaluation policy described by the `[evaluation]` section.
    pub fn policy(&self) -> EvaluationPolicy {
        match self.evaluation.policy {
            PolicyKind::Fixed => EvaluationPolicy::FixedThreshold(self.evaluation.thresholds),
            PolicyKind::Tolerance => EvaluationPolicy::Tolerance {
                percent: self.evaluation.tolerance_percent,
            },
            PolicyKind::Banded => EvaluationPolicy::Banded,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = MonitorConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, MonitorConfig::default());
        assert_eq!(config.monitor.poll_interval_secs, 5);
        assert_eq!(config.policy(), EvaluationPolicy::Banded);
    }

    #[test]
    fn test_full_file_parses() {
        let text = r#"
            [backend]
            api_url = "http://192.168.100.10:3000"
            timeout_secs = 3

            [monitor]
            poll_interval_secs = 30
            plants_file = "./plants.toml"

            [evaluation]
            policy = "fixed"
            [evaluation.thresholds.temperature]
            low = 16
            high = 28

            [logging]
            level = "warn"
            console_timestamps = true
        "#;
        let config = MonitorConfig::from_toml_str(text).expect("valid config");
        assert_eq!(config.backend.api_url, "http://192.168.100.10:3000");
        assert_eq!(config.monitor.poll_interval_secs, 30);
        assert_eq!(config.monitor.plants_file.as_deref(), Some("./plants.toml"));
        assert_eq!(config.logging.level, LogLevel::Warning);

        match config.policy() {
            EvaluationPolicy::FixedThreshold(t) => {
                assert_eq!(t.temperature.low, 16.0);
                // untouched kinds keep their defaults
                assert_eq!(t.luminosity, FixedThresholds::default().luminosity);
            }
            other => panic!("expected fixed policy, got {:?}", other),
        }
    }

    #[test]
    fn test_tolerance_policy_carries_percent() {
        let text = "[evaluation]\npolicy = \"tolerance\"\ntolerance_percent = 15.0\n";
        let config = MonitorConfig::from_toml_str(text).expect("valid config");
        assert_eq!(config.policy(), EvaluationPolicy::Tolerance { percent: 15.0 });
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(MonitorConfig::from_toml_str("[monitor]\npoll_interval_secs = 0\n").is_err());
        assert!(MonitorConfig::from_toml_str("[evaluation]\ntolerance_percent = -5.0\n").is_err());
        assert!(MonitorConfig::from_toml_str("[backend]\napi_url = \"localhost:3000\"\n").is_err());
        assert!(MonitorConfig::from_toml_str("[evaluation]\npolicy = \"fuzzy\"\n").is_err());
        assert!(
            MonitorConfig::from_toml_str("[evaluation.thresholds.humidity]\nlow = 80\nhigh = 20\n").is_err()
        );
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GARDEN_API_URL", "http://10.0.0.2:3000"),
            ("GARDEN_POLL_SECS", "15"),
            ("GARDEN_AUTH_TOKEN", "abc.def.ghi"),
            ("GARDEN_USER_ID", "6650f0a1"),
        ]
        .into_iter()
        .collect();

        let mut config = MonitorConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .expect("overrides are valid");

        assert_eq!(config.backend.api_url, "http://10.0.0.2:3000");
        assert_eq!(config.monitor.poll_interval_secs, 15);
        assert_eq!(config.backend.auth_token.as_deref(), Some("abc.def.ghi"));
        assert_eq!(config.backend.user_id.as_deref(), Some("6650f0a1"));
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn test_bad_env_poll_interval_is_config_error() {
        let mut config = MonitorConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "GARDEN_POLL_SECS").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(GardenError::Config(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = MonitorConfig::load_or_default("./no-such-dir/garden.toml").expect("defaults");
        assert_eq!(config, MonitorConfig::default());
    }
}
