//! Valuation grid construction.
//!
//! Each cell `(date, price)` sums the signed ×100 theoretical value of
//! every leg with the underlying at `price`, evaluated at `date`. Today is
//! evaluated at the build instant; later dates at the market close. Legs
//! expire at the close of their expiration date.

use std::time::Instant;

use chrono::{NaiveDateTime, NaiveTime};
use pricer_core::types::time::add_days;
use pricer_core::types::{market_close, year_fraction, EngineError};
use pricer_models::lattice::DEFAULT_STEPS;

use super::axis::{date_axis, price_axis, validate_range, DEFAULT_SAMPLE_COUNT};
use super::parallel::{map_rows, ParallelConfig};
use super::rebuild::{RebuildTicket, RebuildTracker};
use crate::error::GridError;
use crate::strategy::Strategy;

/// Default half-width of the price axis around spot (±10%).
pub const DEFAULT_PRICE_BAND: f64 = 0.10;

/// Inclusive price axis bounds with `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBounds {
    /// Lowest sampled price
    pub lower: f64,
    /// Highest sampled price
    pub upper: f64,
}

impl PriceBounds {
    /// Validated bounds.
    ///
    /// # Errors
    /// `GridError::InvalidRange` unless `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, GridError> {
        validate_range(lower, upper)?;
        Ok(Self { lower, upper })
    }

    /// `spot · (1 - band) .. spot · (1 + band)`.
    ///
    /// # Errors
    /// `GridError::InvalidRange` for a non-positive spot or band.
    pub fn around(spot: f64, band: f64) -> Result<Self, GridError> {
        Self::new(spot * (1.0 - band), spot * (1.0 + band))
    }
}

/// Grid build settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Number of price samples
    pub sample_count: usize,
    /// Relative half-width of the default price axis
    pub price_band: f64,
    /// Lattice steps for American legs
    pub lattice_steps: usize,
    /// Time of day at which later dates and expirations are evaluated
    pub market_close: NaiveTime,
    /// Row parallelisation
    pub parallel: ParallelConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            price_band: DEFAULT_PRICE_BAND,
            lattice_steps: DEFAULT_STEPS,
            market_close: market_close(),
            parallel: ParallelConfig::default(),
        }
    }
}

/// Aggregate value and profit over the date × price axes.
///
/// `value[i][j]` is the strategy value on `days[i]` with the underlying at
/// `prices[j]`; `profit[i][j] = value[i][j] - cost_basis`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationGrid {
    /// Day offsets from the build date
    pub days: Vec<u32>,
    /// Evaluation instant of each row
    pub instants: Vec<NaiveDateTime>,
    /// Sampled underlying prices, ascending
    pub prices: Vec<f64>,
    /// Strategy value per cell
    pub value: Vec<Vec<f64>>,
    /// Strategy profit per cell
    pub profit: Vec<Vec<f64>>,
    /// Cost basis subtracted from every cell
    pub cost_basis: f64,
    /// Rebuild generation that produced this grid
    pub generation: u64,
}

impl ValuationGrid {
    /// `(dates, prices)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.days.len(), self.prices.len())
    }

    /// Value at a cell, if in range.
    pub fn value_at(&self, date: usize, price: usize) -> Option<f64> {
        self.value.get(date)?.get(price).copied()
    }

    /// Profit at a cell, if in range.
    pub fn profit_at(&self, date: usize, price: usize) -> Option<f64> {
        self.profit.get(date)?.get(price).copied()
    }
}

/// Stateful grid builder.
///
/// Holds the configured price bounds (a rejected update leaves the previous
/// bounds in effect) and the rebuild counter. Every call to [`GridEngine::build`]
/// supersedes builds still in flight.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::types::{OptionContract, OptionKind};
/// use pricer_strategy::grid::GridEngine;
/// use pricer_strategy::{Direction, Strategy};
///
/// let contract = OptionContract::builder("SPY", 500.0, OptionKind::Call)
///     .quotes(6.00, 6.20)
///     .implied_volatility(16.0)
///     .days_to_expiration(30)
///     .build();
/// let mut strategy = Strategy::new("SPY", 500.0, 0.045);
/// strategy.add_leg(contract, Direction::Long).unwrap();
///
/// let mut engine = GridEngine::default();
/// engine.set_price_bounds(480.0, 520.0).unwrap();
/// assert!(engine.set_price_bounds(520.0, 480.0).is_err());
///
/// let now = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let grid = engine.build(&strategy, now).unwrap();
/// assert_eq!(grid.shape(), (20, 20));
/// assert_eq!(grid.prices[0], 480.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GridEngine {
    config: GridConfig,
    bounds: Option<PriceBounds>,
    tracker: RebuildTracker,
}

impl GridEngine {
    /// Creates an engine with the given settings and default bounds.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            bounds: None,
            tracker: RebuildTracker::new(),
        }
    }

    /// Current settings.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Rebuild counter; clone it to cancel builds from another thread.
    pub fn tracker(&self) -> &RebuildTracker {
        &self.tracker
    }

    /// Sets explicit price axis bounds.
    ///
    /// # Errors
    /// `GridError::InvalidRange` unless `lower < upper`; the previous bounds
    /// stay in effect.
    pub fn set_price_bounds(&mut self, lower: f64, upper: f64) -> Result<(), GridError> {
        self.bounds = Some(PriceBounds::new(lower, upper)?);
        Ok(())
    }

    /// Returns to the default band around spot.
    pub fn reset_price_bounds(&mut self) {
        self.bounds = None;
    }

    /// Sets the number of price samples.
    ///
    /// # Errors
    /// `GridError::InvalidSampleCount` for zero; the previous count stays.
    pub fn set_sample_count(&mut self, count: usize) -> Result<(), GridError> {
        if count == 0 {
            return Err(GridError::InvalidSampleCount { count });
        }
        self.config.sample_count = count;
        Ok(())
    }

    /// Bounds used for a strategy at `spot`: explicit if set, otherwise the
    /// configured band.
    ///
    /// # Errors
    /// `GridError::InvalidRange` if the default band is degenerate.
    pub fn price_bounds(&self, spot: f64) -> Result<PriceBounds, GridError> {
        match self.bounds {
            Some(bounds) => Ok(bounds),
            None => PriceBounds::around(spot, self.config.price_band),
        }
    }

    /// Rebuilds the full grid, superseding any build in flight.
    ///
    /// # Errors
    /// - `GridError::InvalidRange` / `GridError::InvalidSampleCount` for a bad price axis
    /// - `GridError::Pricing` if any leg cannot be priced
    /// - `GridError::Superseded` if another build started before this one finished
    pub fn build(&self, strategy: &Strategy, now: NaiveDateTime) -> Result<ValuationGrid, GridError> {
        let ticket = self.tracker.begin();
        self.build_with_ticket(strategy, now, &ticket)
    }

    /// Builds under an existing ticket. Stops at the next row once the
    /// ticket is stale.
    pub fn build_with_ticket(
        &self,
        strategy: &Strategy,
        now: NaiveDateTime,
        ticket: &RebuildTicket,
    ) -> Result<ValuationGrid, GridError> {
        let started = Instant::now();
        let close = self.config.market_close;
        let steps = self.config.lattice_steps;
        let rate = strategy.rate();

        let bounds = self.price_bounds(strategy.spot())?;
        let prices = price_axis(bounds.lower, bounds.upper, self.config.sample_count)?;
        let days = date_axis(strategy.max_dte());

        let today = now.date();
        let instants: Vec<NaiveDateTime> = days
            .iter()
            .map(|&day| {
                if day == 0 {
                    now
                } else {
                    add_days(today, day).and_time(close)
                }
            })
            .collect();
        let expiries: Vec<NaiveDateTime> = strategy
            .legs()
            .iter()
            .map(|leg| leg.expiry_instant(today, close))
            .collect();

        let n_cells = days.len() * prices.len() * strategy.len().max(1);
        let rows = map_rows(&instants, n_cells, &self.config.parallel, |&at| {
            ticket.ensure_current()?;
            prices
                .iter()
                .map(|&spot| {
                    strategy
                        .legs()
                        .iter()
                        .zip(&expiries)
                        .try_fold(0.0, |acc, (leg, &expiry)| {
                            let remaining = year_fraction(at, expiry);
                            Ok::<f64, EngineError>(acc + leg.value_at(spot, remaining, rate, steps)?)
                        })
                        .map_err(GridError::from)
                })
                .collect::<Result<Vec<f64>, GridError>>()
        });
        let value = rows.into_iter().collect::<Result<Vec<_>, _>>()?;
        ticket.ensure_current()?;

        let cost_basis = strategy.cost_basis();
        let profit: Vec<Vec<f64>> = value
            .iter()
            .map(|row| row.iter().map(|v| v - cost_basis).collect())
            .collect();

        tracing::debug!(
            generation = ticket.generation(),
            legs = strategy.len(),
            dates = days.len(),
            prices = prices.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "valuation grid built"
        );

        Ok(ValuationGrid {
            days,
            instants,
            prices,
            value,
            profit,
            cost_basis,
            generation: ticket.generation(),
        })
    }
}

/// One-shot grid build with explicit bounds and default settings otherwise.
///
/// # Errors
/// `EngineError::InvalidRange` if `lower >= upper`, or any pricing error.
pub fn build_grid(
    strategy: &Strategy,
    lower: f64,
    upper: f64,
    sample_count: usize,
    now: NaiveDateTime,
) -> Result<ValuationGrid, EngineError> {
    let mut engine = GridEngine::new(GridConfig {
        sample_count,
        ..GridConfig::default()
    });
    engine.set_price_bounds(lower, upper)?;
    Ok(engine.build(strategy, now)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leg::{Direction, Leg};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use pricer_core::types::{expiry_instant, ExerciseStyle, OptionContract, OptionKind};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn contract(strike: f64, kind: OptionKind, ask: f64, dte: u32) -> OptionContract {
        OptionContract::builder("SPY", strike, kind)
            .quotes(ask - 0.1, ask)
            .implied_volatility(20.0)
            .days_to_expiration(dte)
            .build()
    }

    fn long_call(dte: u32) -> Strategy {
        let mut s = Strategy::new("SPY", 100.0, 0.05);
        s.add_leg(contract(100.0, OptionKind::Call, 3.0, dte), Direction::Long)
            .unwrap();
        s
    }

    // ==========================================================
    // Configuration
    // ==========================================================

    #[test]
    fn test_default_bounds_band() {
        let engine = GridEngine::default();
        let bounds = engine.price_bounds(200.0).unwrap();
        assert_relative_eq!(bounds.lower, 180.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.upper, 220.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejected_bounds_keep_previous() {
        let mut engine = GridEngine::default();
        engine.set_price_bounds(90.0, 110.0).unwrap();
        assert!(matches!(
            engine.set_price_bounds(120.0, 80.0),
            Err(GridError::InvalidRange { .. })
        ));
        assert_eq!(
            engine.price_bounds(500.0).unwrap(),
            PriceBounds {
                lower: 90.0,
                upper: 110.0
            }
        );
        engine.reset_price_bounds();
        assert_relative_eq!(engine.price_bounds(500.0).unwrap().lower, 450.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejected_sample_count_keeps_previous() {
        let mut engine = GridEngine::default();
        assert!(engine.set_sample_count(0).is_err());
        assert_eq!(engine.config().sample_count, DEFAULT_SAMPLE_COUNT);
        engine.set_sample_count(7).unwrap();
        assert_eq!(engine.config().sample_count, 7);
    }

    // ==========================================================
    // Build
    // ==========================================================

    #[test]
    fn test_empty_strategy_single_row_of_zeros() {
        let grid = GridEngine::default()
            .build(&Strategy::new("SPY", 100.0, 0.05), now())
            .unwrap();
        assert_eq!(grid.shape(), (1, 20));
        assert!(grid.value[0].iter().all(|&v| v == 0.0));
        assert!(grid.profit[0].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_axes_and_instants() {
        let grid = GridEngine::default().build(&long_call(5), now()).unwrap();
        assert_eq!(grid.days, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(grid.instants[0], now());
        assert_eq!(
            grid.instants[1],
            NaiveDate::from_ymd_opt(2024, 6, 4).unwrap().and_hms_opt(16, 0, 0).unwrap()
        );
        assert_eq!(grid.prices.len(), 20);
        assert_eq!(grid.prices[0], 90.0);
        assert_eq!(grid.prices[19], 110.0);
    }

    #[test]
    fn test_expiry_row_is_intrinsic() {
        let grid = GridEngine::default().build(&long_call(5), now()).unwrap();
        let last = grid.days.len() - 1;
        for (j, &price) in grid.prices.iter().enumerate() {
            let expected = 100.0 * (price - 100.0).max(0.0);
            assert_relative_eq!(grid.value[last][j], expected, epsilon = 1e-9);
            assert_relative_eq!(grid.profit[last][j], expected - 300.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_time_value_decays_for_long_option() {
        let grid = GridEngine::default().build(&long_call(10), now()).unwrap();
        let atm = grid.prices.iter().position(|&p| p >= 100.0).unwrap();
        assert!(grid.value[0][atm] > grid.value[5][atm]);
        assert!(grid.value[5][atm] > grid.value[10][atm]);
    }

    #[test]
    fn test_european_leg_matches_closed_form() {
        let mut s = Strategy::new("SPY", 100.0, 0.05);
        let leg = Leg::new(contract(100.0, OptionKind::Put, 2.0, 30), Direction::Short)
            .unwrap()
            .with_exercise_style(ExerciseStyle::European);
        s.push_leg(leg.clone()).unwrap();

        let mut engine = GridEngine::default();
        engine.set_price_bounds(95.0, 105.0).unwrap();
        let grid = engine.build(&s, now()).unwrap();

        let expiry = expiry_instant(now().date(), 30, market_close());
        let t = year_fraction(now(), expiry);
        let expected = leg.value_at(grid.prices[3], t, 0.05, 100).unwrap();
        assert_relative_eq!(grid.value[0][3], expected, epsilon = 1e-9);
        assert!(grid.value[0][3] < 0.0);
    }

    #[test]
    fn test_dated_contract_keeps_expiry_when_clock_moves() {
        let expiration = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let dated = OptionContract::builder("SPY", 100.0, OptionKind::Call)
            .quotes(2.9, 3.0)
            .implied_volatility(20.0)
            .days_to_expiration(7)
            .expiration(expiration)
            .build();
        let mut s = Strategy::new("SPY", 100.0, 0.05);
        s.add_leg(dated, Direction::Long).unwrap();

        let later = NaiveDate::from_ymd_opt(2024, 6, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let engine = GridEngine::default();
        let grid = engine.build(&s, later).unwrap();

        let expires_at = expiration.and_time(market_close());
        let t = year_fraction(later, expires_at);
        let expected = s.legs()[0]
            .value_at(grid.prices[10], t, 0.05, engine.config().lattice_steps)
            .unwrap();
        assert_relative_eq!(grid.value[0][10], expected, epsilon = 1e-9);

        // Expires on day 5 of the axis, not day 7.
        assert_eq!(grid.instants[5], expires_at);
        for (j, &price) in grid.prices.iter().enumerate() {
            assert_relative_eq!(grid.value[5][j], 100.0 * (price - 100.0).max(0.0), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let strategy = long_call(40);
        let parallel = GridEngine::new(GridConfig {
            parallel: ParallelConfig::new(true, 0),
            ..GridConfig::default()
        });
        let sequential = GridEngine::new(GridConfig {
            parallel: ParallelConfig::sequential(),
            ..GridConfig::default()
        });
        let a = parallel.build(&strategy, now()).unwrap();
        let b = sequential.build(&strategy, now()).unwrap();
        assert_eq!(a.value, b.value);
        assert_eq!(a.days.len(), 20);
    }

    #[test]
    fn test_pricing_error_propagates() {
        let mut s = Strategy::new("SPY", 100.0, 0.05);
        let mut c = contract(100.0, OptionKind::Call, 3.0, 10);
        c.implied_volatility = 0.0;
        s.add_leg(c, Direction::Long).unwrap();
        let result = GridEngine::default().build(&s, now());
        assert!(matches!(
            result,
            Err(GridError::Pricing(EngineError::InvalidModelParameters(_)))
        ));
    }

    // ==========================================================
    // Supersession
    // ==========================================================

    #[test]
    fn test_stale_ticket_discarded() {
        let engine = GridEngine::default();
        let stale = engine.tracker().begin();
        let fresh = engine.tracker().begin();

        let result = engine.build_with_ticket(&long_call(5), now(), &stale);
        assert_eq!(
            result,
            Err(GridError::Superseded {
                generation: stale.generation(),
                latest: fresh.generation()
            })
        );
        let grid = engine.build_with_ticket(&long_call(5), now(), &fresh).unwrap();
        assert_eq!(grid.generation, fresh.generation());
    }

    #[test]
    fn test_each_build_advances_generation() {
        let engine = GridEngine::default();
        let first = engine.build(&long_call(3), now()).unwrap();
        let second = engine.build(&long_call(3), now()).unwrap();
        assert!(second.generation > first.generation);
        assert_eq!(first.value, second.value);
    }

    // ==========================================================
    // One-shot API
    // ==========================================================

    #[test]
    fn test_build_grid_invalid_range() {
        let result = build_grid(&long_call(5), 110.0, 90.0, 20, now());
        assert_eq!(
            result,
            Err(EngineError::InvalidRange {
                lower: 110.0,
                upper: 90.0
            })
        );
    }

    #[test]
    fn test_build_grid_sample_count() {
        let grid = build_grid(&long_call(5), 90.0, 110.0, 9, now()).unwrap();
        assert_eq!(grid.shape(), (6, 9));
        assert!(build_grid(&long_call(5), 90.0, 110.0, 0, now()).is_err());
    }
}
