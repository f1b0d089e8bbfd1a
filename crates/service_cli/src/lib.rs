//! Strikeboard CLI - headless front end for the valuation engine
//!
//! # Commands
//!
//! - `strikeboard grid --scenario <file>` - Date × price profit grid
//! - `strikeboard payoff --scenario <file>` - Profit at expiration with break-evens
//! - `strikeboard volatility --prices <file>` - Historical volatility estimate
//! - `strikeboard check` - Effective settings and model smoke test
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate is the only one that touches files,
//! the environment and the terminal. It turns provider chain snapshots and
//! TOML scenarios into `pricer_strategy` strategies and prints the results.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod scenario;
pub mod snapshot;

pub use error::{CliError, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
