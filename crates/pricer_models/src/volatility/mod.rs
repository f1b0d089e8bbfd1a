//! Volatility inputs for the pricing models.
//!
//! This module provides:
//! - `historical`: annualised volatility from a closing-price series
//! - `implied`: sanitation of provider-reported implied volatility and yields
//! - `error`: `VolatilityError`

pub mod error;
pub mod historical;
pub mod implied;

pub use error::VolatilityError;
pub use historical::{estimate_volatility, VolatilityEstimator, MIN_PRICES, TRADING_DAYS_PER_YEAR};
pub use implied::{cap_implied_volatility, dividend_yield_from_percent, IMPLIED_VOLATILITY_CEILING};
