//! Expiration payoff curve.
//!
//! Model-free: each leg contributes sign × 100 × (intrinsic - entry price)
//! at every price on the axis.

use crate::error::GridError;
use crate::grid::axis::price_axis;
use crate::strategy::Strategy;

/// Default number of points on the payoff axis.
pub const DEFAULT_PAYOFF_SAMPLES: usize = 1000;

/// Lower edge of the default axis as a fraction of spot and strikes.
const AXIS_FLOOR: f64 = 0.05;

/// Upper edge of the default axis as a multiple of spot and strikes.
const AXIS_CEILING: f64 = 6.0;

/// Profit at expiration at every price on `price_axis`.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionContract, OptionKind};
/// use pricer_strategy::{compute_payoff_curve, Direction, Strategy};
///
/// let put = OptionContract::builder("IWM", 200.0, OptionKind::Put)
///     .quotes(3.90, 4.00)
///     .days_to_expiration(30)
///     .build();
/// let mut s = Strategy::new("IWM", 205.0, 0.04);
/// s.add_leg(put, Direction::Long).unwrap();
///
/// let curve = compute_payoff_curve(&s, &[190.0, 196.0, 210.0]);
/// assert_eq!(curve, vec![600.0, 0.0, -400.0]);
/// ```
pub fn compute_payoff_curve(strategy: &Strategy, price_axis: &[f64]) -> Vec<f64> {
    price_axis
        .iter()
        .map(|&price| {
            strategy
                .legs()
                .iter()
                .map(|leg| leg.payoff_at_expiry(price))
                .sum()
        })
        .collect()
}

/// Axis wide enough to show every strike crossing: from 5% of the lowest
/// of spot and strikes to 6× the highest, `samples` points rounded to cents.
///
/// # Errors
/// `GridError::InvalidRange` for a non-positive spot, or
/// `GridError::InvalidSampleCount` for zero samples.
pub fn default_payoff_axis(
    spot: f64,
    strikes: impl IntoIterator<Item = f64>,
    samples: usize,
) -> Result<Vec<f64>, GridError> {
    let (low, high) = strikes
        .into_iter()
        .fold((spot, spot), |(lo, hi), k| (lo.min(k), hi.max(k)));
    price_axis(low * AXIS_FLOOR, high * AXIS_CEILING, samples)
}

/// Payoff curve with its summary statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffCurve {
    /// Underlying prices at expiration, ascending
    pub prices: Vec<f64>,
    /// Strategy profit at each price
    pub profit: Vec<f64>,
}

impl PayoffCurve {
    /// Evaluates `strategy` over `prices`.
    pub fn new(strategy: &Strategy, prices: Vec<f64>) -> Self {
        let profit = compute_payoff_curve(strategy, &prices);
        Self { prices, profit }
    }

    /// Evaluates `strategy` over [`default_payoff_axis`].
    ///
    /// # Errors
    /// As for [`default_payoff_axis`].
    pub fn with_default_axis(strategy: &Strategy, samples: usize) -> Result<Self, GridError> {
        let prices = default_payoff_axis(strategy.spot(), strategy.strikes(), samples)?;
        Ok(Self::new(strategy, prices))
    }

    /// Highest profit on the axis.
    pub fn max_profit(&self) -> Option<f64> {
        self.profit.iter().copied().reduce(f64::max)
    }

    /// Lowest profit on the axis (negative for a loss).
    pub fn max_loss(&self) -> Option<f64> {
        self.profit.iter().copied().reduce(f64::min)
    }

    /// Prices where profit crosses zero, linearly interpolated between
    /// neighbouring samples.
    pub fn breakevens(&self) -> Vec<f64> {
        let mut out: Vec<f64> = Vec::new();
        let mut push = |price: f64| {
            if out.last().map_or(true, |&last| (price - last).abs() > 1e-9) {
                out.push(price);
            }
        };

        for (i, (&p0, &v0)) in self.prices.iter().zip(&self.profit).enumerate() {
            if v0 == 0.0 {
                push(p0);
                continue;
            }
            let (Some(&p1), Some(&v1)) = (self.prices.get(i + 1), self.profit.get(i + 1)) else {
                continue;
            };
            if v1 != 0.0 && v0.signum() != v1.signum() {
                push(p0 + (p1 - p0) * v0 / (v0 - v1));
            }
        }
        out
    }
}
