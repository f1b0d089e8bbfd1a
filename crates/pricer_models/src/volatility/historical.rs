//! Historical volatility estimation.
//!
//! σ = std(ln(pₜ / pₜ₋₁)) · √(trading days per year)

use pricer_core::math::statistics::{std_dev, DegreesOfFreedom};
use pricer_core::types::EngineError;

use super::error::VolatilityError;

/// Trading days used to annualise daily return volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Two prices give the single return the estimator needs.
pub const MIN_PRICES: usize = 2;

/// Annualised close-to-close volatility estimator.
///
/// # Examples
/// ```
/// use pricer_models::volatility::VolatilityEstimator;
///
/// let sigma = VolatilityEstimator::default()
///     .estimate(&[100.0, 102.0, 101.0, 105.0, 103.0])
///     .unwrap();
/// assert!((sigma - 0.4249).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatilityEstimator {
    /// Annualisation factor (periods per year)
    pub trading_days: f64,
    /// Divisor convention for the return standard deviation
    pub dof: DegreesOfFreedom,
}

impl Default for VolatilityEstimator {
    fn default() -> Self {
        Self {
            trading_days: TRADING_DAYS_PER_YEAR,
            dof: DegreesOfFreedom::Sample,
        }
    }
}

impl VolatilityEstimator {
    /// Estimator with a custom annualisation factor and divisor.
    pub fn new(trading_days: f64, dof: DegreesOfFreedom) -> Self {
        Self { trading_days, dof }
    }

    /// Same estimator with population (n) standard deviation.
    pub fn population(self) -> Self {
        Self {
            dof: DegreesOfFreedom::Population,
            ..self
        }
    }

    /// Minimum number of prices this estimator accepts.
    pub fn min_prices(&self) -> usize {
        MIN_PRICES
    }

    /// Consecutive log returns `ln(p[t] / p[t-1])`.
    ///
    /// # Errors
    /// `VolatilityError::InvalidPrice` for a non-positive or non-finite price.
    pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>, VolatilityError> {
        if let Some((index, &price)) = prices
            .iter()
            .enumerate()
            .find(|(_, p)| **p <= 0.0 || !p.is_finite())
        {
            return Err(VolatilityError::InvalidPrice { index, price });
        }
        Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
    }

    /// Annualised volatility of the series, in decimal form.
    ///
    /// A constant series yields exactly 0. With a single return the sample
    /// divisor is undefined, so the population divisor is used and the
    /// result is 0.
    ///
    /// # Errors
    /// - `VolatilityError::InsufficientData` with fewer than [`Self::min_prices`] prices
    /// - `VolatilityError::InvalidPrice` if any log return is undefined
    pub fn estimate(&self, prices: &[f64]) -> Result<f64, VolatilityError> {
        let need = self.min_prices();
        if prices.len() < need {
            return Err(VolatilityError::InsufficientData {
                got: prices.len(),
                need,
            });
        }

        let returns = Self::log_returns(prices)?;
        let dof = if returns.len() > self.dof.ddof() {
            self.dof
        } else {
            DegreesOfFreedom::Population
        };
        let daily = std_dev(&returns, dof).ok_or(VolatilityError::InsufficientData {
            got: prices.len(),
            need,
        })?;

        Ok(daily * self.trading_days.sqrt())
    }
}

/// Annualised historical volatility with the default (sample) estimator.
///
/// # Errors
/// - `EngineError::InsufficientData` when fewer than 2 prices are supplied
/// - `EngineError::InvalidModelParameters` for a non-positive price
pub fn estimate_volatility(prices: &[f64]) -> Result<f64, EngineError> {
    Ok(VolatilityEstimator::default().estimate(prices)?)
}
