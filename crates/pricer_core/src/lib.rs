//! # pricer_core: Foundation Types for the Strikeboard Valuation Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the engine and provides:
//! - Contract data model: `OptionContract`, `OptionKind`, `ExerciseStyle`, `Greeks` (`types`)
//! - Option chain grouping by expiration: `OptionChain` (`types::chain`)
//! - Time conventions: market close, Act/365 year fractions (`types::time`)
//! - The engine-wide error taxonomy: `EngineError` (`types::error`)
//! - Standard normal distribution and sample statistics (`math`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::types::{OptionContract, OptionKind};
//!
//! let contract = OptionContract::builder("AAPL", 230.0, OptionKind::Call)
//!     .quotes(4.10, 4.25)
//!     .implied_volatility(28.5)
//!     .days_to_expiration(14)
//!     .build();
//! assert_eq!(contract.kind.intrinsic(240.0, contract.strike), 10.0);
//!
//! let half = norm_cdf(0.0_f64);
//! # assert!((half - 0.5).abs() < 1e-7);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation support for contract and chain types

#![warn(missing_docs)]

pub mod math;
pub mod traits;
pub mod types;
