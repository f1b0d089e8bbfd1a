//! One option position within a strategy.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use pricer_core::types::time::{close_at, expiry_instant};
use pricer_core::types::{EngineError, ExerciseStyle, OptionContract, OptionKind, PricingInputs};
use pricer_models::pricing::{value_or_intrinsic, PricingModel};
use pricer_models::volatility::cap_implied_volatility;

use crate::error::StrategyError;

/// Underlying units per listed contract.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Side of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Bought: pays the premium
    Long,
    /// Sold: receives the premium
    Short,
}

impl Direction {
    /// +1 for long, -1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Ok(Direction::Long),
            "short" | "sell" => Ok(Direction::Short),
            other => Err(StrategyError::UnknownDirection(other.to_string())),
        }
    }
}

/// A single one-contract position.
///
/// The entry price is the contract's ask when the leg is created and does
/// not follow later quotes.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionContract, OptionKind};
/// use pricer_strategy::{Direction, Leg};
///
/// let contract = OptionContract::builder("AAPL", 230.0, OptionKind::Call)
///     .quotes(4.10, 4.25)
///     .implied_volatility(28.5)
///     .days_to_expiration(14)
///     .build();
///
/// let leg = Leg::new(contract, Direction::Short).unwrap();
/// assert_eq!(leg.entry_price(), 4.25);
/// assert_eq!(leg.premium(), -425.0);
/// assert!((leg.volatility() - 0.285).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    contract: OptionContract,
    direction: Direction,
    entry_price: f64,
    dividend_yield: f64,
    exercise_style: ExerciseStyle,
    volatility: f64,
}

impl Leg {
    /// Opens a leg at the contract's ask, American exercise, zero dividend yield.
    ///
    /// The contract's implied volatility is converted and capped here, once.
    ///
    /// # Errors
    /// `StrategyError::InvalidStrike` if the strike is not strictly positive.
    pub fn new(contract: OptionContract, direction: Direction) -> Result<Self, StrategyError> {
        if contract.strike <= 0.0 || !contract.strike.is_finite() {
            return Err(StrategyError::InvalidStrike {
                strike: contract.strike,
            });
        }
        let entry_price = contract.ask;
        let volatility = cap_implied_volatility(contract.implied_volatility);
        Ok(Self {
            contract,
            direction,
            entry_price,
            dividend_yield: 0.0,
            exercise_style: ExerciseStyle::default(),
            volatility,
        })
    }

    /// Sets the continuous dividend yield (decimal).
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Sets the exercise style, which selects the pricing model.
    pub fn with_exercise_style(mut self, style: ExerciseStyle) -> Self {
        self.exercise_style = style;
        self
    }

    /// Prices with this decimal volatility instead of the contract's implied one.
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// The underlying contract snapshot.
    pub fn contract(&self) -> &OptionContract {
        &self.contract
    }

    /// Long or short.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Per-share price paid or received when the leg was opened.
    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    /// Continuous dividend yield used for this leg.
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Exercise style used for this leg.
    pub fn exercise_style(&self) -> ExerciseStyle {
        self.exercise_style
    }

    /// Contract strike.
    pub fn strike(&self) -> f64 {
        self.contract.strike
    }

    /// Call or put.
    pub fn kind(&self) -> OptionKind {
        self.contract.kind
    }

    /// Days to expiration as of the snapshot.
    pub fn days_to_expiration(&self) -> u32 {
        self.contract.days_to_expiration
    }

    /// Expiration instant: the contract's expiration date at `close` when the
    /// snapshot carries one, otherwise `days_to_expiration` days after `today`.
    pub fn expiry_instant(&self, today: NaiveDate, close: NaiveTime) -> NaiveDateTime {
        match self.contract.expiration {
            Some(date) => close_at(date, close),
            None => expiry_instant(today, self.contract.days_to_expiration, close),
        }
    }

    /// Decimal volatility used for pricing: the override if set, otherwise
    /// the contract's implied volatility after the ceiling is applied.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Signed cash outlay for one contract: sign × entry × 100.
    #[inline]
    pub fn premium(&self) -> f64 {
        self.direction.sign() * self.entry_price * CONTRACT_MULTIPLIER
    }

    /// Model inputs for this leg at the given spot, remaining time and rate.
    pub fn pricing_inputs(&self, spot: f64, expiry: f64, rate: f64) -> PricingInputs {
        PricingInputs::new(
            spot,
            self.contract.strike,
            expiry,
            rate,
            self.dividend_yield,
            self.volatility(),
            self.contract.kind,
        )
    }

    /// Signed theoretical value of the position (× 100) with `expiry` years
    /// remaining; intrinsic once the contract has expired.
    ///
    /// # Errors
    /// `EngineError::InvalidModelParameters` if the model rejects the inputs.
    pub fn value_at(
        &self,
        spot: f64,
        expiry: f64,
        rate: f64,
        lattice_steps: usize,
    ) -> Result<f64, EngineError> {
        let model = PricingModel::for_style(self.exercise_style, lattice_steps);
        let price = value_or_intrinsic(&model, &self.pricing_inputs(spot, expiry, rate))?;
        Ok(self.direction.sign() * CONTRACT_MULTIPLIER * price)
    }

    /// Profit at expiration for one contract: sign × 100 × (intrinsic - entry).
    #[inline]
    pub fn payoff_at_expiry(&self, spot: f64) -> f64 {
        let intrinsic = self.contract.kind.intrinsic(spot, self.contract.strike);
        self.direction.sign() * CONTRACT_MULTIPLIER * (intrinsic - self.entry_price)
    }
}
