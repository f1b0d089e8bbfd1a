//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Black-Scholes-Merton model with continuous dividend yield
//! - Input-domain validation shared with the lattice (`validate_inputs`)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the closed form works for `f32` and `f64`
//! - **Overflow guarded by domain checks**: exponents are bounded before `exp`

pub mod black_scholes;
pub mod error;

pub use black_scholes::{price_european, BlackScholes};
pub use error::AnalyticalError;

use pricer_core::types::PricingInputs;

/// Largest magnitude accepted for any exponent the models evaluate.
///
/// `exp(700)` is still finite in `f64`; anything above is rejected as
/// overflowing instead of relying on float saturation.
pub const MAX_EXPONENT: f64 = 700.0;

/// Checks the domain every model shares: `S > 0`, `K > 0`, `T > 0`, `σ > 0`,
/// finite rate and yield, and exponents that stay finite.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionKind, PricingInputs};
/// use pricer_models::analytical::{validate_inputs, AnalyticalError};
///
/// let ok = PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2, OptionKind::Call);
/// assert!(validate_inputs(&ok).is_ok());
///
/// let expired = ok.with_expiry(0.0);
/// assert!(matches!(validate_inputs(&expired), Err(AnalyticalError::InvalidExpiry { .. })));
/// ```
pub fn validate_inputs(inputs: &PricingInputs) -> Result<(), AnalyticalError> {
    if inputs.spot <= 0.0 || !inputs.spot.is_finite() {
        return Err(AnalyticalError::InvalidSpot { spot: inputs.spot });
    }
    if inputs.strike <= 0.0 || !inputs.strike.is_finite() {
        return Err(AnalyticalError::InvalidStrike {
            strike: inputs.strike,
        });
    }
    if inputs.expiry <= 0.0 || !inputs.expiry.is_finite() {
        return Err(AnalyticalError::InvalidExpiry {
            expiry: inputs.expiry,
        });
    }
    if inputs.volatility <= 0.0 || !inputs.volatility.is_finite() {
        return Err(AnalyticalError::InvalidVolatility {
            volatility: inputs.volatility,
        });
    }
    check_exponent("r·T", inputs.rate * inputs.expiry)?;
    check_exponent("q·T", inputs.dividend_yield * inputs.expiry)?;
    check_exponent("σ²·T", inputs.volatility * inputs.volatility * inputs.expiry)?;
    Ok(())
}

/// Rejects a non-finite exponent or one whose magnitude exceeds [`MAX_EXPONENT`].
pub(crate) fn check_exponent(term: &'static str, value: f64) -> Result<(), AnalyticalError> {
    if !value.is_finite() || value.abs() > MAX_EXPONENT {
        return Err(AnalyticalError::ExponentOverflow { term, value });
    }
    Ok(())
}
