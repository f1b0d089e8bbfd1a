//! Recombining lattice models.
//!
//! - `binomial`: Cox-Ross-Rubinstein tree with optional early exercise

pub mod binomial;

pub use binomial::{BinomialTree, LatticeFactors, DEFAULT_STEPS};
