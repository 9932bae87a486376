//! Simulation run configuration as a TOML-loadable struct

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::types::thresholds::run_defaults;

/// Shape of one simulation run.
///
/// Every field has a `#[serde(default)]`, so an empty file is a valid config
/// that reproduces the built-in 50 hour run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of ticks to simulate
    #[serde(default = "default_ticks")]
    pub ticks: u32,

    /// Simulated seconds per tick
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f64,

    /// CSV flight log path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// RNG seed; `None` seeds from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_ticks() -> u32 {
    run_defaults::TICKS
}

fn default_tick_seconds() -> f64 {
    run_defaults::TICK_SECONDS
}

fn default_output() -> PathBuf {
    PathBuf::from(run_defaults::OUTPUT_PATH)
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            tick_seconds: default_tick_seconds(),
            output: default_output(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load from a TOML file and validate.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        info!(path = %path.display(), ticks = config.ticks, "Loaded simulation config");
        Ok(config)
    }

    /// Serialize config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check the run shape, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.ticks == 0 {
            errors.push("ticks: must be at least 1".to_string());
        }
        if !self.tick_seconds.is_finite() {
            errors.push(format!("tick_seconds: must be finite (got {})", self.tick_seconds));
        } else if self.tick_seconds < 0.0 {
            errors.push(format!(
                "tick_seconds: must not be negative (got {})",
                self.tick_seconds
            ));
        }
        if self.output.as_os_str().is_empty() {
            errors.push("output: path must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Simulated duration of the whole run in seconds
    pub fn run_seconds(&self) -> f64 {
        f64::from(self.ticks) * self.tick_seconds
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(_, e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_fifty_hour_run() {
        let config = SimulationConfig::default();
        assert_eq!(config.ticks, 3000);
        assert!((config.tick_seconds - 60.0).abs() < f64::EPSILON);
        assert_eq!(config.output, PathBuf::from("flight_log.csv"));
        assert_eq!(config.seed, None);
        assert!((config.run_seconds() - 180_000.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_round_trip_preserves_fields() {
        let config = SimulationConfig {
            ticks: 120,
            tick_seconds: 30.0,
            output: PathBuf::from("short.csv"),
            seed: Some(99),
        };
        let text = config.to_toml().expect("serialize");
        let parsed: SimulationConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }
}
