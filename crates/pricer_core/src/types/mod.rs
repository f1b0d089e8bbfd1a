//! Core contract, time, and error types.
//!
//! This module provides:
//! - `option`: Option kind (`Call`/`Put`) and exercise style (`European`/`American`)
//! - `inputs`: Scalar pricing inputs shared by every pricing model
//! - `contract`: Immutable `OptionContract` snapshot records and informational `Greeks`
//! - `chain`: `OptionChain` grouping contracts by expiration
//! - `time`: Market-close instants and Act/365 year fractions
//! - `error`: The engine-wide `EngineError` taxonomy
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod chain;
pub mod contract;
pub mod error;
pub mod inputs;
pub mod option;
pub mod time;

// Re-export commonly used types at module level
pub use chain::{ExpirationSlice, OptionChain};
pub use contract::{Greeks, OptionContract, OptionContractBuilder};
pub use error::{EngineError, EngineResult};
pub use inputs::PricingInputs;
pub use option::{ExerciseStyle, OptionKind};
pub use time::{
    expiry_instant, market_close, market_close_on, year_fraction, DAYS_PER_YEAR,
    EXPIRY_EPSILON, MARKET_CLOSE_HOUR, SECONDS_PER_YEAR,
};
