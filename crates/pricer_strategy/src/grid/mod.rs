//! Date × price valuation grid.
//!
//! This module provides:
//! - `axis`: date and price sampling axes
//! - `engine`: `GridEngine` and the `ValuationGrid` it produces
//! - `rebuild`: generation tickets that let a newer rebuild supersede an older one
//! - `parallel`: row-level Rayon parallelism

pub mod axis;
pub mod engine;
pub mod parallel;
pub mod rebuild;

pub use axis::{date_axis, price_axis, round_cents, DEFAULT_SAMPLE_COUNT, MAX_DATE_POINTS};
pub use engine::{build_grid, GridConfig, GridEngine, PriceBounds, ValuationGrid, DEFAULT_PRICE_BAND};
pub use parallel::ParallelConfig;
pub use rebuild::{RebuildTicket, RebuildTracker};
