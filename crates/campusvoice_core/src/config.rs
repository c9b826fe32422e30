//! Runtime configuration resolved from environment variables.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Malformed values are rejected, never silently replaced.

use crate::logging::{default_log_level, init_logging, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_LOG_LEVEL: &str = "CAMPUSVOICE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CAMPUSVOICE_LOG_DIR";
pub const ENV_SUBMIT_LATENCY_MS: &str = "CAMPUSVOICE_SUBMIT_LATENCY_MS";
pub const ENV_LOGIN_LATENCY_MS: &str = "CAMPUSVOICE_LOGIN_LATENCY_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLatency { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLatency { key, value } => write!(
                f,
                "{key} must be a whole number of milliseconds, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// Simulated round-trip before a feedback write.
    pub submit_latency: Duration,
    /// Simulated round-trip before a credential check.
    pub login_latency: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            submit_latency: Duration::ZERO,
            login_latency: Duration::ZERO,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        if let Some(raw) = read(ENV_SUBMIT_LATENCY_MS) {
            config.submit_latency = parse_latency(ENV_SUBMIT_LATENCY_MS, &raw)?;
        }
        if let Some(raw) = read(ENV_LOGIN_LATENCY_MS) {
            config.login_latency = parse_latency(ENV_LOGIN_LATENCY_MS, &raw)?;
        }
        Ok(config)
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging is not configured.
    pub fn start_logging(&self) -> Result<bool, LoggingError> {
        let Some(dir) = &self.log_dir else {
            return Ok(false);
        };
        init_logging(&self.log_level, &dir.to_string_lossy())?;
        Ok(true)
    }
}

fn parse_latency(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidLatency {
            key,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, CoreConfig, ENV_LOGIN_LATENCY_MS, ENV_LOG_DIR, ENV_SUBMIT_LATENCY_MS,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config, CoreConfig::default());
        assert!(!config.start_logging().expect("logging is not configured"));
    }

    #[test]
    fn reads_latencies_and_log_dir() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_SUBMIT_LATENCY_MS, " 1000 "),
            (ENV_LOGIN_LATENCY_MS, "800"),
            (ENV_LOG_DIR, "/var/log/campusvoice"),
        ]))
        .expect("valid config");
        assert_eq!(config.submit_latency, Duration::from_millis(1000));
        assert_eq!(config.login_latency, Duration::from_millis(800));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/campusvoice")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            CoreConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "   ")])).expect("blank ignored");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn rejects_non_numeric_latency() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_SUBMIT_LATENCY_MS, "fast")]))
            .expect_err("bad latency must fail");
        assert_eq!(
            err,
            ConfigError::InvalidLatency {
                key: ENV_SUBMIT_LATENCY_MS,
                value: "fast".to_string(),
            }
        );
    }
}
