//! Error types for structured error handling.
//!
//! This module provides `EngineError`, the taxonomy reported across the
//! engine's call surface. Layer-specific errors (`AnalyticalError`,
//! `VolatilityError`, `StrategyError`, `GridError`) carry richer context and
//! convert into it.
//!
//! All variants are local, recoverable conditions: the caller corrects the
//! input and retries. Policies such as the implied-volatility ceiling and the
//! zero-time intrinsic short-circuit substitute a value and never raise.

use thiserror::Error;

/// Categorised engine errors.
///
/// # Variants
/// - `InsufficientData`: volatility estimation starved of input
/// - `InvalidModelParameters`: non-positive spot/strike/time/volatility, or a
///   lattice probability/up-down factor outside its valid domain
/// - `InvalidStrike`: non-positive strike at leg creation
/// - `InvalidRange`: price axis bounds inverted or equal, or an empty axis
/// - `InvalidStrategy`: legs that do not fit the strategy (wrong underlying,
///   index out of range)
/// - `Superseded`: a grid rebuild was replaced by a newer one and its
///   results were discarded
///
/// # Examples
/// ```
/// use pricer_core::types::EngineError;
///
/// let err = EngineError::InvalidRange { lower: 110.0, upper: 90.0 };
/// assert_eq!(format!("{}", err), "Invalid price range: lower 110 must be below upper 90");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Not enough observations to estimate a statistic.
    #[error("Insufficient data: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of observations supplied
        got: usize,
        /// Minimum number of observations required
        need: usize,
    },

    /// Pricing inputs outside the model's domain.
    #[error("Invalid model parameters: {0}")]
    InvalidModelParameters(String),

    /// Strike must be strictly positive.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Price axis bounds inverted or equal.
    #[error("Invalid price range: lower {lower} must be below upper {upper}")]
    InvalidRange {
        /// Requested lower bound
        lower: f64,
        /// Requested upper bound
        upper: f64,
    },

    /// Strategy composition error.
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// A newer rebuild replaced this one.
    #[error("Rebuild {generation} superseded by {latest}")]
    Superseded {
        /// Generation of the discarded rebuild
        generation: u64,
        /// Generation that replaced it
        latest: u64,
    },
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let err = EngineError::InsufficientData { got: 1, need: 2 };
        assert_eq!(
            format!("{}", err),
            "Insufficient data: got 1, need at least 2"
        );
    }

    #[test]
    fn test_invalid_model_parameters_display() {
        let err = EngineError::InvalidModelParameters("σ = 0".to_string());
        assert_eq!(format!("{}", err), "Invalid model parameters: σ = 0");
    }

    #[test]
    fn test_invalid_strike_display() {
        let err = EngineError::InvalidStrike { strike: -5.0 };
        assert_eq!(format!("{}", err), "Invalid strike: K = -5");
    }

    #[test]
    fn test_superseded_display() {
        let err = EngineError::Superseded {
            generation: 3,
            latest: 4,
        };
        assert_eq!(format!("{}", err), "Rebuild 3 superseded by 4");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = EngineError::InvalidRange {
            lower: 1.0,
            upper: 1.0,
        };
        let _: &dyn std::error::Error = &err;
    }
}
