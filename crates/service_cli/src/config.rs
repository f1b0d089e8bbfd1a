//! Engine settings management
//!
//! Handles loading settings from a TOML file, `STRIKEBOARD_*` environment
//! variables and CLI flags.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveTime;
use pricer_strategy::grid::{GridConfig, ParallelConfig};
use serde::Deserialize;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// A setting outside its admissible range.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting name
        key: &'static str,
        /// Rejected value as given
        value: String,
    },

    /// Settings file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Grid build diagnostics
    Debug,
    /// Progress messages
    Info,
    /// Policy substitutions and problems
    #[default]
    Warn,
    /// Failures only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Price samples on the grid axis
    pub sample_count: usize,
    /// Relative half-width of the default grid price axis
    pub price_band: f64,
    /// Lattice steps for American legs
    pub lattice_steps: usize,
    /// Evaluate grid rows in parallel
    pub parallel: bool,
    /// Points on the default payoff axis
    pub payoff_samples: usize,
    /// Market close as `HH:MM`
    pub market_close: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            sample_count: 20,
            price_band: 0.10,
            lattice_steps: 100,
            parallel: true,
            payoff_samples: 1000,
            market_close: "16:00".to_string(),
        }
    }
}

const ENV_LOG_LEVEL: &str = "STRIKEBOARD_LOG_LEVEL";
const ENV_SAMPLE_COUNT: &str = "STRIKEBOARD_SAMPLE_COUNT";
const ENV_PRICE_BAND: &str = "STRIKEBOARD_PRICE_BAND";
const ENV_LATTICE_STEPS: &str = "STRIKEBOARD_LATTICE_STEPS";
const ENV_PARALLEL: &str = "STRIKEBOARD_PARALLEL";
const ENV_PAYOFF_SAMPLES: &str = "STRIKEBOARD_PAYOFF_SAMPLES";
const ENV_MARKET_CLOSE: &str = "STRIKEBOARD_MARKET_CLOSE";

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

impl EngineSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let settings: EngineSettings = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Overrides fields from `STRIKEBOARD_*` environment variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Overrides fields from any variable source.
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(raw) = lookup(ENV_SAMPLE_COUNT) {
            self.sample_count = parse_value(ENV_SAMPLE_COUNT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PRICE_BAND) {
            self.price_band = parse_value(ENV_PRICE_BAND, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LATTICE_STEPS) {
            self.lattice_steps = parse_value(ENV_LATTICE_STEPS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PARALLEL) {
            self.parallel = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(raw) = lookup(ENV_PAYOFF_SAMPLES) {
            self.payoff_samples = parse_value(ENV_PAYOFF_SAMPLES, &raw)?;
        }
        if let Some(close) = lookup(ENV_MARKET_CLOSE) {
            self.market_close = close;
        }
        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 {
            return Err(ConfigError::InvalidValue {
                key: "sample_count",
                value: self.sample_count.to_string(),
            });
        }
        if !(self.price_band > 0.0 && self.price_band < 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "price_band",
                value: self.price_band.to_string(),
            });
        }
        if self.lattice_steps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "lattice_steps",
                value: self.lattice_steps.to_string(),
            });
        }
        if self.payoff_samples == 0 {
            return Err(ConfigError::InvalidValue {
                key: "payoff_samples",
                value: self.payoff_samples.to_string(),
            });
        }
        self.market_close_time()?;
        Ok(())
    }

    /// Market close as a time of day.
    pub fn market_close_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.market_close.trim(), "%H:%M").map_err(|_| {
            ConfigError::InvalidValue {
                key: "market_close",
                value: self.market_close.clone(),
            }
        })
    }

    /// Grid builder settings derived from these settings.
    pub fn grid_config(&self) -> Result<GridConfig, ConfigError> {
        let parallel = if self.parallel {
            ParallelConfig::default()
        } else {
            ParallelConfig::sequential()
        };
        Ok(GridConfig {
            sample_count: self.sample_count,
            price_band: self.price_band,
            lattice_steps: self.lattice_steps,
            market_close: self.market_close_time()?,
            parallel,
        })
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(steps) = cli.lattice_steps {
            self.lattice_steps = steps;
        }
        if let Some(parallel) = cli.parallel {
            self.parallel = parallel;
        }
        Ok(())
    }
}

/// CLI arguments that override settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Settings file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Lattice step override
    pub lattice_steps: Option<usize>,
    /// Parallel evaluation override
    pub parallel: Option<bool>,
}

/// Build settings from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Settings file
/// 4. Default values
pub fn build_settings(cli: &CliOverrides) -> Result<EngineSettings, ConfigError> {
    let mut settings = match &cli.config_file {
        Some(path) => EngineSettings::from_file(path)?,
        None => EngineSettings::default(),
    };

    settings.apply_env()?;
    settings.merge_with_cli(cli)?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert_eq!(settings.sample_count, 20);
        assert_eq!(settings.price_band, 0.10);
        assert_eq!(settings.lattice_steps, 100);
        assert!(settings.parallel);
        assert_eq!(settings.payoff_samples, 1000);
        assert_eq!(
            settings.market_close_time().unwrap(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap()
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sample_count = 30\nlog_level = \"debug\"\nmarket_close = \"15:30\"").unwrap();

        let settings = EngineSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.sample_count, 30);
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.lattice_steps, 100);
        assert_eq!(
            settings.grid_config().unwrap().market_close,
            NaiveTime::from_hms_opt(15, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "price_band = 1.5").unwrap();
        assert!(matches!(
            EngineSettings::from_file(file.path()),
            Err(ConfigError::InvalidValue { key: "price_band", .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = EngineSettings::from_file(Path::new("/nonexistent/strikeboard.toml"));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = EngineSettings::default();
        settings
            .apply_vars(vars(&[
                ("STRIKEBOARD_SAMPLE_COUNT", "40"),
                ("STRIKEBOARD_PARALLEL", "false"),
                ("STRIKEBOARD_LOG_LEVEL", "info"),
            ]))
            .unwrap();
        assert_eq!(settings.sample_count, 40);
        assert!(!settings.parallel);
        assert_eq!(settings.log_level, LogLevel::Info);
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut settings = EngineSettings::default();
        let result = settings.apply_vars(vars(&[("STRIKEBOARD_LATTICE_STEPS", "many")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "STRIKEBOARD_LATTICE_STEPS", .. })
        ));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let mut settings = EngineSettings::default();
        settings
            .apply_vars(vars(&[("STRIKEBOARD_LATTICE_STEPS", "250")]))
            .unwrap();
        settings
            .merge_with_cli(&CliOverrides {
                lattice_steps: Some(400),
                parallel: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.lattice_steps, 400);
        assert_eq!(
            settings.grid_config().unwrap().parallel,
            ParallelConfig::sequential()
        );
    }

    #[test]
    fn test_bad_market_close() {
        let settings = EngineSettings {
            market_close: "4pm".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
