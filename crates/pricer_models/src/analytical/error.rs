//! Error types for single-contract pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: domain violations detected by the closed form and the lattice

use pricer_core::types::EngineError;
use thiserror::Error;

/// Pricing model errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode. Every variant is an
/// `InvalidModelParameters` condition at the engine surface.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive or non-finite).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive or non-finite).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike (non-positive or non-finite).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Time to expiry must be strictly positive; expired contracts are
    /// valued at intrinsic by the caller.
    #[error("Invalid time to expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid time to expiry in years
        expiry: f64,
    },

    /// An exponent would overflow `f64`.
    #[error("Exponent overflow in {term}: {value}")]
    ExponentOverflow {
        /// Which product overflowed
        term: &'static str,
        /// The offending exponent
        value: f64,
    },

    /// Lattice factors outside `0 < d < 1 < u`, `0 <= p <= 1`.
    #[error("Invalid lattice: u = {up}, d = {down}, p = {probability}")]
    InvalidLattice {
        /// Up factor
        up: f64,
        /// Down factor
        down: f64,
        /// Risk-neutral up probability
        probability: f64,
    },

    /// Lattice needs at least one step.
    #[error("Invalid lattice steps: {steps}")]
    InvalidSteps {
        /// Requested step count
        steps: usize,
    },
}

impl From<AnalyticalError> for EngineError {
    fn from(err: AnalyticalError) -> Self {
        EngineError::InvalidModelParameters(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_invalid_spot_display() {
        let err = AnalyticalError::InvalidSpot { spot: -100.0 };
        assert_eq!(format!("{}", err), "Invalid spot price: S = -100");
    }

    #[test]
    fn test_invalid_lattice_display() {
        let err = AnalyticalError::InvalidLattice {
            up: 1.1,
            down: 0.9,
            probability: 1.2,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid lattice: u = 1.1, d = 0.9, p = 1.2"
        );
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = AnalyticalError::InvalidExpiry { expiry: 0.0 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }

    #[test]
    fn test_to_engine_error() {
        let err = AnalyticalError::InvalidStrike { strike: 0.0 };
        let engine: EngineError = err.into();
        match engine {
            EngineError::InvalidModelParameters(msg) => assert!(msg.contains("strike")),
            _ => panic!("Expected InvalidModelParameters variant"),
        }
    }

    #[test]
    fn test_exponent_overflow_to_engine_error() {
        let err = AnalyticalError::ExponentOverflow {
            term: "r·T",
            value: 1e4,
        };
        let engine: EngineError = err.into();
        assert!(matches!(engine, EngineError::InvalidModelParameters(_)));
    }
}
