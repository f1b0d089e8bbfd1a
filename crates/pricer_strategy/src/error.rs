//! Strategy and grid error types.
//!
//! This module provides structured error types for leg management and grid
//! construction using `thiserror` for derivation. Both convert into the
//! engine-wide `EngineError`.

use pricer_core::types::EngineError;
use thiserror::Error;

/// Errors raised while assembling a strategy.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StrategyError {
    /// Leg strike must be strictly positive.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Leg contract is written on a different underlying.
    #[error("Underlying mismatch: strategy is on {expected}, contract is on {found}")]
    UnderlyingMismatch {
        /// Strategy ticker
        expected: String,
        /// Contract underlying
        found: String,
    },

    /// No leg at the requested position.
    #[error("Leg index {index} out of range for {len} legs")]
    LegIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current leg count
        len: usize,
    },

    /// Direction label that is neither long nor short.
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
}

impl From<StrategyError> for EngineError {
    fn from(err: StrategyError) -> Self {
        match err {
            StrategyError::InvalidStrike { strike } => EngineError::InvalidStrike { strike },
            other => EngineError::InvalidStrategy(other.to_string()),
        }
    }
}

/// Errors raised while building a valuation grid or payoff axis.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GridError {
    /// Price axis bounds inverted, equal or non-finite.
    #[error("Invalid price range: lower {lower} must be below upper {upper}")]
    InvalidRange {
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Price axis needs at least one sample.
    #[error("Invalid sample count: {count}")]
    InvalidSampleCount {
        /// Requested sample count
        count: usize,
    },

    /// A newer rebuild started while this one was running.
    #[error("Rebuild {generation} superseded by {latest}")]
    Superseded {
        /// Generation of the discarded rebuild
        generation: u64,
        /// Latest generation at the time of the check
        latest: u64,
    },

    /// A leg could not be priced.
    #[error(transparent)]
    Pricing(#[from] EngineError),
}

impl From<GridError> for EngineError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidRange { lower, upper } => EngineError::InvalidRange { lower, upper },
            GridError::InvalidSampleCount { .. } => EngineError::InvalidModelParameters(err.to_string()),
            GridError::Superseded { generation, latest } => {
                EngineError::Superseded { generation, latest }
            }
            GridError::Pricing(inner) => inner,
        }
    }
}
