//! Volatility estimation errors.

use pricer_core::types::EngineError;
use thiserror::Error;

/// Errors raised while estimating volatility from a price series.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VolatilityError {
    /// Too few prices to form the required number of returns.
    #[error("Insufficient price history: got {got}, need at least {need}")]
    InsufficientData {
        /// Prices supplied
        got: usize,
        /// Prices required
        need: usize,
    },

    /// A price for which the log return is undefined.
    #[error("Invalid price at index {index}: {price}")]
    InvalidPrice {
        /// Position in the series
        index: usize,
        /// The offending value
        price: f64,
    },
}

impl From<VolatilityError> for EngineError {
    fn from(err: VolatilityError) -> Self {
        match err {
            VolatilityError::InsufficientData { got, need } => {
                EngineError::InsufficientData { got, need }
            }
            other => EngineError::InvalidModelParameters(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_maps_through() {
        let err: EngineError = VolatilityError::InsufficientData { got: 1, need: 2 }.into();
        assert_eq!(err, EngineError::InsufficientData { got: 1, need: 2 });
    }

    #[test]
    fn test_invalid_price_maps_to_model_parameters() {
        let err: EngineError = VolatilityError::InvalidPrice {
            index: 3,
            price: -1.0,
        }
        .into();
        assert!(matches!(err, EngineError::InvalidModelParameters(msg) if msg.contains("index 3")));
    }
}
