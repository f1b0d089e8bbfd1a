//! Cox-Ross-Rubinstein binomial lattice.
//!
//! With Δt = T/n:
//! - u = e^(σ√Δt), d = 1/u
//! - p = (e^((r-q)Δt) - d) / (u - d)
//!
//! Node value at step j with i up-moves is S·u^(2i-j). Backward induction
//! discounts by e^(-rΔt) and, with early exercise, takes the maximum of
//! continuation and intrinsic at every node.

use pricer_core::traits::OptionPricer;
use pricer_core::types::{EngineError, PricingInputs};

use crate::analytical::{check_exponent, validate_inputs, AnalyticalError};

/// Step count used when none is configured.
pub const DEFAULT_STEPS: usize = 100;

/// Per-step lattice parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeFactors {
    /// Step length Δt in years
    pub dt: f64,
    /// Up factor u
    pub up: f64,
    /// Down factor d = 1/u
    pub down: f64,
    /// Risk-neutral probability of an up-move
    pub probability: f64,
    /// One-step discount factor e^(-rΔt)
    pub discount: f64,
}

/// Binomial tree pricer.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionKind, PricingInputs};
/// use pricer_models::lattice::BinomialTree;
///
/// let inputs = PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2, OptionKind::Put);
/// let american = BinomialTree::american(100).price(&inputs).unwrap();
/// let european = BinomialTree::european(100).price(&inputs).unwrap();
/// assert!(american > european);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialTree {
    steps: usize,
    early_exercise: bool,
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self::american(DEFAULT_STEPS)
    }
}

impl BinomialTree {
    /// Creates a tree with the given step count and exercise policy.
    pub fn new(steps: usize, early_exercise: bool) -> Self {
        Self {
            steps,
            early_exercise,
        }
    }

    /// Tree with early exercise at every node.
    pub fn american(steps: usize) -> Self {
        Self::new(steps, true)
    }

    /// Tree that only exercises at expiry.
    pub fn european(steps: usize) -> Self {
        Self::new(steps, false)
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Whether early exercise is checked at interior nodes.
    #[inline]
    pub fn early_exercise(&self) -> bool {
        self.early_exercise
    }

    /// Computes and validates the per-step factors.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSteps` if `steps == 0`
    /// - `AnalyticalError::InvalidLattice` unless `0 < d < 1 < u` and `0 <= p <= 1`
    pub fn factors(&self, inputs: &PricingInputs) -> Result<LatticeFactors, AnalyticalError> {
        if self.steps == 0 {
            return Err(AnalyticalError::InvalidSteps { steps: self.steps });
        }

        let dt = inputs.expiry / self.steps as f64;
        let up = (inputs.volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = ((inputs.rate - inputs.dividend_yield) * dt).exp();
        let probability = (growth - down) / (up - down);
        let discount = (-inputs.rate * dt).exp();

        let valid = down > 0.0
            && down < 1.0
            && up > 1.0
            && (0.0..=1.0).contains(&probability)
            && discount.is_finite();
        if !valid {
            return Err(AnalyticalError::InvalidLattice {
                up,
                down,
                probability,
            });
        }

        Ok(LatticeFactors {
            dt,
            up,
            down,
            probability,
            discount,
        })
    }

    /// Prices the contract described by `inputs`.
    ///
    /// # Errors
    /// Domain violations from input validation, an overflowing terminal
    /// node, or lattice factors outside their admissible range. Factors are
    /// never clamped.
    pub fn price(&self, inputs: &PricingInputs) -> Result<f64, AnalyticalError> {
        validate_inputs(inputs)?;
        let f = self.factors(inputs)?;
        let n = self.steps;

        // ln(S·u^n) bounds every node
        check_exponent("σ·√(nT)", n as f64 * f.up.ln())?;

        let strike = inputs.strike;
        let kind = inputs.kind;

        // Terminal nodes run S·d^n, S·d^(n-2), ..., S·u^n; stepping back one
        // level maps node i to nodes[i]·u.
        let lowest = (0..n).fold(inputs.spot, |s, _| s * f.down);
        let up_squared = f.up * f.up;
        let mut nodes: Vec<f64> = std::iter::successors(Some(lowest), |&s| Some(s * up_squared))
            .take(n + 1)
            .collect();
        let mut values: Vec<f64> = nodes.iter().map(|&s| kind.intrinsic(s, strike)).collect();

        let p = f.probability;
        let q = 1.0 - p;
        for step in (0..n).rev() {
            for i in 0..=step {
                let hold = f.discount * (p * values[i + 1] + q * values[i]);
                nodes[i] *= f.up;
                values[i] = if self.early_exercise {
                    hold.max(kind.intrinsic(nodes[i], strike))
                } else {
                    hold
                };
            }
        }

        Ok(values[0])
    }
}

impl OptionPricer for BinomialTree {
    type Error = EngineError;

    fn price(&self, inputs: &PricingInputs) -> Result<f64, Self::Error> {
        BinomialTree::price(self, inputs).map_err(EngineError::from)
    }
}
