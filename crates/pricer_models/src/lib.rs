//! # Pricer Models (L2: Business Logic)
//!
//! Single-contract option pricing and volatility estimation.
//!
//! This crate provides:
//! - Black-Scholes-Merton closed form with continuous dividend yield (`analytical`)
//! - Cox-Ross-Rubinstein binomial lattice with early exercise (`lattice`)
//! - Exercise-style dispatch and the expiry short-circuit (`pricing`)
//! - Historical volatility estimation and implied-volatility sanitation (`volatility`)
//!
//! ## Design Principles
//!
//! - **Enum-based model dispatch** (`PricingModel`) for static dispatch
//! - **Validate, never clamp**: out-of-domain inputs are errors, not silently fixed
//! - **Explicit policies**: the implied-volatility ceiling and the intrinsic
//!   short-circuit at expiry substitute documented values instead of failing
//!
//! ## Examples
//!
//! ```
//! use pricer_core::types::{ExerciseStyle, OptionKind, PricingInputs};
//! use pricer_models::pricing::price_option;
//!
//! let inputs = PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2, OptionKind::Call);
//! let european = price_option(ExerciseStyle::European, &inputs).unwrap();
//! let american = price_option(ExerciseStyle::American, &inputs).unwrap();
//!
//! assert!((european - 10.4506).abs() < 1e-3);
//! assert!((american - european).abs() < 0.05);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod lattice;
pub mod pricing;
pub mod volatility;

pub use analytical::{AnalyticalError, BlackScholes};
pub use lattice::BinomialTree;
pub use pricing::{price_option, value_or_intrinsic, PricingModel};
pub use volatility::{
    cap_implied_volatility, estimate_volatility, VolatilityError, VolatilityEstimator,
};
