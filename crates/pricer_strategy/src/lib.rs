//! # pricer_strategy (L3: Strategy Valuation)
//!
//! Multi-leg option strategies and their valuation surfaces.
//!
//! This crate provides:
//! - `Direction`, `Leg` and `Strategy` with a running cost basis (`leg`, `strategy`)
//! - The date × price valuation grid, rebuilt in full on every change (`grid`)
//! - The model-free expiration payoff curve (`payoff`)
//!
//! Grid cells are priced through `pricer_models` (closed form for European
//! legs, CRR lattice for American legs) and every leg counts as one
//! contract of 100 shares.
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use pricer_core::types::{OptionContract, OptionKind};
//! use pricer_strategy::grid::GridEngine;
//! use pricer_strategy::{compute_payoff_curve, Direction, Strategy};
//!
//! let call = OptionContract::builder("MSFT", 420.0, OptionKind::Call)
//!     .quotes(7.80, 8.00)
//!     .implied_volatility(24.0)
//!     .days_to_expiration(12)
//!     .build();
//!
//! let mut strategy = Strategy::new("MSFT", 418.5, 0.045);
//! strategy.add_leg(call, Direction::Long).unwrap();
//! assert_eq!(strategy.cost_basis(), 800.0);
//!
//! let now = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap().and_hms_opt(11, 0, 0).unwrap();
//! let grid = GridEngine::default().build(&strategy, now).unwrap();
//! assert_eq!(grid.days.len(), 13);
//!
//! let payoff = compute_payoff_curve(&strategy, &grid.prices);
//! assert_eq!(payoff.len(), grid.prices.len());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation of legs, strategies, grids and curves
//! - `parallel` (default): Rayon row parallelism for large grids

#![warn(missing_docs)]

pub mod error;
pub mod grid;
pub mod leg;
pub mod payoff;
pub mod strategy;

pub use error::{GridError, StrategyError};
pub use grid::{build_grid, GridConfig, GridEngine, ValuationGrid};
pub use leg::{Direction, Leg, CONTRACT_MULTIPLIER};
pub use payoff::{compute_payoff_curve, default_payoff_axis, PayoffCurve, DEFAULT_PAYOFF_SAMPLES};
pub use strategy::Strategy;
