//! Multi-leg strategy with a running cost basis.

use pricer_core::types::OptionContract;

use crate::error::StrategyError;
use crate::leg::{Direction, Leg};

/// An ordered set of legs over one underlying.
///
/// All legs share the strategy's spot and risk-free rate; each carries its
/// own dividend yield, exercise style and volatility. The cost basis is
/// Σ sign × ask × 100 over the current legs.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionContract, OptionKind};
/// use pricer_strategy::{Direction, Strategy};
///
/// let call = |strike: f64, ask: f64| {
///     OptionContract::builder("AAPL", strike, OptionKind::Call)
///         .quotes(ask - 0.05, ask)
///         .implied_volatility(30.0)
///         .days_to_expiration(21)
///         .build()
/// };
///
/// let mut spread = Strategy::new("AAPL", 228.0, 0.045);
/// spread.add_leg(call(225.0, 6.10), Direction::Long).unwrap();
/// spread.add_leg(call(235.0, 2.05), Direction::Short).unwrap();
/// assert!((spread.cost_basis() - 405.0).abs() < 1e-9);
///
/// spread.remove_leg(1).unwrap();
/// assert!((spread.cost_basis() - 610.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strategy {
    ticker: String,
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    legs: Vec<Leg>,
    cost_basis: f64,
}

impl Strategy {
    /// Creates an empty strategy.
    pub fn new(ticker: impl Into<String>, spot: f64, rate: f64) -> Self {
        Self {
            ticker: ticker.into(),
            spot,
            rate,
            dividend_yield: 0.0,
            legs: Vec::new(),
            cost_basis: 0.0,
        }
    }

    /// Dividend yield assigned to legs opened through [`Strategy::add_leg`].
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Underlying ticker.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Shared spot price.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Shared risk-free rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Default dividend yield for new legs.
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Moves the shared spot, e.g. on a fresh quote.
    pub fn set_spot(&mut self, spot: f64) {
        self.spot = spot;
    }

    /// Opens a leg at the contract's ask with the strategy's dividend yield.
    ///
    /// # Errors
    /// - `StrategyError::InvalidStrike` if the strike is not strictly positive
    /// - `StrategyError::UnderlyingMismatch` if the contract is on another ticker
    pub fn add_leg(
        &mut self,
        contract: OptionContract,
        direction: Direction,
    ) -> Result<&Leg, StrategyError> {
        let leg = Leg::new(contract, direction)?.with_dividend_yield(self.dividend_yield);
        self.push_leg(leg)
    }

    /// Appends a fully configured leg.
    ///
    /// # Errors
    /// `StrategyError::UnderlyingMismatch` if the leg is on another ticker.
    pub fn push_leg(&mut self, leg: Leg) -> Result<&Leg, StrategyError> {
        if leg.contract().underlying != self.ticker {
            return Err(StrategyError::UnderlyingMismatch {
                expected: self.ticker.clone(),
                found: leg.contract().underlying.clone(),
            });
        }
        self.cost_basis += leg.premium();
        self.legs.push(leg);
        Ok(&self.legs[self.legs.len() - 1])
    }

    /// Removes and returns the leg at `index`.
    ///
    /// The cost basis is recomputed from the remaining legs.
    ///
    /// # Errors
    /// `StrategyError::LegIndexOutOfRange` if there is no such leg.
    pub fn remove_leg(&mut self, index: usize) -> Result<Leg, StrategyError> {
        if index >= self.legs.len() {
            return Err(StrategyError::LegIndexOutOfRange {
                index,
                len: self.legs.len(),
            });
        }
        let leg = self.legs.remove(index);
        self.recompute_cost_basis();
        Ok(leg)
    }

    /// Removes every leg.
    pub fn clear(&mut self) {
        self.legs.clear();
        self.recompute_cost_basis();
    }

    /// Signed sum of entry premiums × 100.
    #[inline]
    pub fn cost_basis(&self) -> f64 {
        self.cost_basis
    }

    /// Legs in insertion order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Number of legs.
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Returns `true` if there are no legs.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Longest days-to-expiration over all legs, 0 when empty.
    pub fn max_dte(&self) -> u32 {
        self.legs
            .iter()
            .map(Leg::days_to_expiration)
            .max()
            .unwrap_or(0)
    }

    /// Strikes of all legs in insertion order.
    pub fn strikes(&self) -> impl Iterator<Item = f64> + '_ {
        self.legs.iter().map(Leg::strike)
    }

    fn recompute_cost_basis(&mut self) {
        self.cost_basis = self.legs.iter().map(Leg::premium).sum();
    }
}
