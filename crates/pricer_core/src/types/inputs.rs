//! Scalar pricing inputs shared by every single-contract model.

use super::option::OptionKind;

/// The (S, K, T, r, q, σ, kind) tuple that prices one contract.
///
/// Rates, yields and volatility are annualised decimals; `expiry` is the
/// remaining time in years. No validation happens here: each model checks
/// the domain it needs.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionKind, PricingInputs};
///
/// let inputs = PricingInputs::new(100.0, 95.0, 0.25, 0.045, 0.004, 0.3, OptionKind::Put);
/// assert_eq!(inputs.intrinsic(), 0.0);
/// assert_eq!(inputs.with_spot(90.0).intrinsic(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingInputs {
    /// Underlying price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub expiry: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
    /// Continuous dividend yield (q)
    pub dividend_yield: f64,
    /// Annualised volatility (σ)
    pub volatility: f64,
    /// Call or put
    pub kind: OptionKind,
}

impl PricingInputs {
    /// Creates a new set of pricing inputs.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> Self {
        Self {
            spot,
            strike,
            expiry,
            rate,
            dividend_yield,
            volatility,
            kind,
        }
    }

    /// Intrinsic value at the current spot.
    #[inline]
    pub fn intrinsic(&self) -> f64 {
        self.kind.intrinsic(self.spot, self.strike)
    }

    /// Same inputs at a different spot.
    #[inline]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Same inputs at a different time to expiry.
    #[inline]
    pub fn with_expiry(self, expiry: f64) -> Self {
        Self { expiry, ..self }
    }

    /// Same inputs with the other option kind.
    #[inline]
    pub fn with_kind(self, kind: OptionKind) -> Self {
        Self { kind, ..self }
    }
}
