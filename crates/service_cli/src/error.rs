//! Error types for the Strikeboard CLI

use pricer_core::types::EngineError;
use pricer_models::VolatilityError;
use pricer_strategy::{GridError, StrategyError};
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Settings could not be loaded or validated
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed chain snapshot
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Malformed or inconsistent scenario
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// Valuation failure
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StrategyError> for CliError {
    fn from(err: StrategyError) -> Self {
        CliError::Engine(err.into())
    }
}

impl From<GridError> for CliError {
    fn from(err: GridError) -> Self {
        CliError::Engine(err.into())
    }
}

impl From<VolatilityError> for CliError {
    fn from(err: VolatilityError) -> Self {
        CliError::Engine(err.into())
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_errors_route_through_engine() {
        let err: CliError = VolatilityError::InsufficientData { got: 1, need: 2 }.into();
        assert!(matches!(
            err,
            CliError::Engine(EngineError::InsufficientData { .. })
        ));

        let err: CliError = StrategyError::InvalidStrike { strike: -5.0 }.into();
        assert!(matches!(err, CliError::Engine(EngineError::InvalidStrike { .. })));
    }

    #[test]
    fn test_messages() {
        let err = CliError::FileNotFound("chain.json".to_string());
        assert_eq!(err.to_string(), "File not found: chain.json");
    }
}
