//! Black-Scholes-Merton pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;
use pricer_core::math::distributions::norm_cdf;
use pricer_core::types::{OptionKind, PricingInputs};

use super::error::AnalyticalError;
use super::{check_exponent, validate_inputs};

/// Black-Scholes-Merton model for European option pricing.
///
/// Holds the market state (spot, rate, dividend yield, volatility); strike
/// and expiry are supplied per contract.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.02, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let parity = call - put - (100.0 * (-0.02_f64).exp() - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend_yield: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes-Merton model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or non-finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or non-finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, dividend_yield: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if spot <= zero || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if volatility <= zero || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Computes d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T).
    ///
    /// `expiry` must be strictly positive.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift =
            (self.rate - self.dividend_yield + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price. `expiry` must be strictly positive.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
    /// assert!((bs.price_call(100.0, 1.0) - 10.4506).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        self.signed_price(strike, expiry, OptionKind::Call)
    }

    /// European put price. `expiry` must be strictly positive.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        self.signed_price(strike, expiry, OptionKind::Put)
    }

    /// φ·(S·e^(−qT)·N(φ·d1) − K·e^(−rT)·N(φ·d2)) with φ = +1 for calls and
    /// −1 for puts.
    #[inline]
    fn signed_price(&self, strike: T, expiry: T, kind: OptionKind) -> T {
        let phi = T::from(kind.phi()).unwrap();
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let spot_df = (-self.dividend_yield * expiry).exp();
        let df = (-self.rate * expiry).exp();

        phi * (self.spot * spot_df * norm_cdf(phi * d1) - strike * df * norm_cdf(phi * d2))
    }

    /// Checked price for a contract of the given kind.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidExpiry` if expiry <= 0
    /// - `AnalyticalError::ExponentOverflow` if any exponent would overflow
    pub fn price(&self, strike: T, expiry: T, kind: OptionKind) -> Result<T, AnalyticalError> {
        let zero = T::zero();
        let to_f64 = |x: T| x.to_f64().unwrap_or(f64::NAN);

        if strike <= zero || !strike.is_finite() {
            return Err(AnalyticalError::InvalidStrike {
                strike: to_f64(strike),
            });
        }
        if expiry <= zero || !expiry.is_finite() {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: to_f64(expiry),
            });
        }
        check_exponent("r·T", to_f64(self.rate * expiry))?;
        check_exponent("q·T", to_f64(self.dividend_yield * expiry))?;

        Ok(self.signed_price(strike, expiry, kind))
    }
}

/// Prices a European contract from scalar inputs.
///
/// # Errors
/// Any domain violation reported by [`validate_inputs`].
pub fn price_european(inputs: &PricingInputs) -> Result<f64, AnalyticalError> {
    validate_inputs(inputs)?;
    let bs = BlackScholes::new(
        inputs.spot,
        inputs.rate,
        inputs.dividend_yield,
        inputs.volatility,
    )?;
    bs.price(inputs.strike, inputs.expiry, inputs.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.01, 0.2).unwrap();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.dividend_yield(), 0.01);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_new_invalid_spot_zero() {
        let result = BlackScholes::new(0.0_f64, 0.05, 0.0, 0.2);
        assert!(matches!(
            result,
            Err(AnalyticalError::InvalidSpot { spot }) if spot == 0.0
        ));
    }

    #[test]
    fn test_new_invalid_volatility_negative() {
        let result = BlackScholes::new(100.0_f64, 0.05, 0.0, -0.2);
        assert!(matches!(
            result,
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_new_rejects_nan_spot() {
        assert!(BlackScholes::new(f64::NAN, 0.05, 0.0, 0.2).is_err());
    }

    // ==========================================================
    // Reference Values
    // ==========================================================

    #[test]
    fn test_atm_call_reference() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_atm_put_reference() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
        assert_relative_eq!(bs.price_put(100.0, 1.0), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_dividend_call_reference() {
        let bs = BlackScholes::new(100.0_f64, 0.03, 0.02, 0.3).unwrap();
        assert_relative_eq!(bs.price_call(110.0, 0.5), 4.8578, epsilon = 1e-3);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
        let d1 = bs.d1(100.0, 1.0);
        let d2 = bs.d2(100.0, 1.0);
        assert_relative_eq!(d1, 0.35, epsilon = 1e-12);
        assert_relative_eq!(d1 - d2, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_dividend_lowers_call_raises_put() {
        let no_div = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
        let div = BlackScholes::new(100.0_f64, 0.05, 0.04, 0.2).unwrap();
        assert!(div.price_call(100.0, 1.0) < no_div.price_call(100.0, 1.0));
        assert!(div.price_put(100.0, 1.0) > no_div.price_put(100.0, 1.0));
    }

    #[test]
    fn test_f32_pricing() {
        let bs = BlackScholes::new(100.0_f32, 0.05, 0.0, 0.2).unwrap();
        assert!((bs.price_call(100.0, 1.0) - 10.4506).abs() < 1e-2);
    }

    // ==========================================================
    // Checked Pricing
    // ==========================================================

    #[test]
    fn test_price_dispatches_on_kind() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
        let call = bs.price(100.0, 1.0, OptionKind::Call).unwrap();
        let put = bs.price(100.0, 1.0, OptionKind::Put).unwrap();
        assert_eq!(call, bs.price_call(100.0, 1.0));
        assert_eq!(put, bs.price_put(100.0, 1.0));
    }

    #[test]
    fn test_price_rejects_zero_expiry() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
        assert!(matches!(
            bs.price(100.0, 0.0, OptionKind::Call),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_price_rejects_zero_strike() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
        assert!(matches!(
            bs.price(0.0, 1.0, OptionKind::Put),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
    }

    #[test]
    fn test_price_rejects_exponent_overflow() {
        let bs = BlackScholes::new(100.0_f64, 50.0, 0.0, 0.2).unwrap();
        assert!(matches!(
            bs.price(100.0, 20.0, OptionKind::Call),
            Err(AnalyticalError::ExponentOverflow { .. })
        ));
    }

    #[test]
    fn test_price_european_from_inputs() {
        let inputs = PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2, OptionKind::Call);
        assert_relative_eq!(price_european(&inputs).unwrap(), 10.4506, epsilon = 1e-3);
        assert!(price_european(&inputs.with_expiry(-1.0)).is_err());
    }

    // ==========================================================
    // Property Tests
    // ==========================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn put_call_parity_holds(
                spot in 10.0_f64..500.0,
                strike in 10.0_f64..500.0,
                expiry in 0.01_f64..3.0,
                rate in -0.02_f64..0.10,
                dividend_yield in 0.0_f64..0.08,
                volatility in 0.05_f64..1.5,
            ) {
                let bs = BlackScholes::new(spot, rate, dividend_yield, volatility).unwrap();
                let lhs = bs.price_call(strike, expiry) - bs.price_put(strike, expiry);
                let rhs = spot * (-dividend_yield * expiry).exp()
                    - strike * (-rate * expiry).exp();
                prop_assert!((lhs - rhs).abs() < 1e-9 * spot.max(strike));
            }

            #[test]
            fn prices_respect_no_arbitrage_bounds(
                spot in 10.0_f64..500.0,
                strike in 10.0_f64..500.0,
                expiry in 0.01_f64..3.0,
                volatility in 0.05_f64..1.5,
            ) {
                let bs = BlackScholes::new(spot, 0.03, 0.01, volatility).unwrap();
                let call = bs.price_call(strike, expiry);
                let put = bs.price_put(strike, expiry);
                let tol = 1e-4 * spot.max(strike);
                prop_assert!(call >= -tol && call <= spot + tol);
                prop_assert!(put >= -tol && put <= strike + tol);
            }
        }
    }
}
