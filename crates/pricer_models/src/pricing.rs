//! Exercise-style dispatch over the pricing models.
//!
//! [`PricingModel`] selects the closed form for European contracts and the
//! lattice for American ones. [`value_or_intrinsic`] applies the expiry
//! short-circuit: at or below [`EXPIRY_EPSILON`] years the model is skipped
//! and intrinsic value is returned.

use pricer_core::traits::OptionPricer;
use pricer_core::types::{EngineError, ExerciseStyle, PricingInputs, EXPIRY_EPSILON};

use crate::analytical::price_european;
use crate::lattice::{BinomialTree, DEFAULT_STEPS};

/// Pricing model selected by exercise style.
///
/// # Examples
/// ```
/// use pricer_core::types::ExerciseStyle;
/// use pricer_models::pricing::PricingModel;
///
/// assert_eq!(
///     PricingModel::for_style(ExerciseStyle::American, 250),
///     PricingModel::AmericanLattice { steps: 250 }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingModel {
    /// Black-Scholes-Merton closed form with continuous dividend yield.
    EuropeanClosedForm,
    /// Cox-Ross-Rubinstein lattice with early exercise.
    AmericanLattice {
        /// Number of time steps
        steps: usize,
    },
}

impl Default for PricingModel {
    fn default() -> Self {
        PricingModel::AmericanLattice {
            steps: DEFAULT_STEPS,
        }
    }
}

impl PricingModel {
    /// Model for the given exercise style; `steps` only applies to the lattice.
    pub fn for_style(style: ExerciseStyle, steps: usize) -> Self {
        match style {
            ExerciseStyle::European => PricingModel::EuropeanClosedForm,
            ExerciseStyle::American => PricingModel::AmericanLattice { steps },
        }
    }

    /// Model name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            PricingModel::EuropeanClosedForm => "european_closed_form",
            PricingModel::AmericanLattice { .. } => "american_lattice",
        }
    }

    /// Prices with the selected model. `T` must be strictly positive.
    ///
    /// # Errors
    /// `EngineError::InvalidModelParameters` for any out-of-domain input.
    pub fn price(&self, inputs: &PricingInputs) -> Result<f64, EngineError> {
        let price = match self {
            PricingModel::EuropeanClosedForm => price_european(inputs)?,
            PricingModel::AmericanLattice { steps } => {
                OptionPricer::price(&BinomialTree::american(*steps), inputs)?
            }
        };
        Ok(price)
    }
}

impl OptionPricer for PricingModel {
    type Error = EngineError;

    fn price(&self, inputs: &PricingInputs) -> Result<f64, Self::Error> {
        PricingModel::price(self, inputs)
    }
}

/// Prices a single contract with the default model for `style`.
///
/// # Errors
/// `EngineError::InvalidModelParameters` on out-of-domain inputs, including
/// `T <= 0`; use [`value_or_intrinsic`] when the contract may have expired.
pub fn price_option(style: ExerciseStyle, inputs: &PricingInputs) -> Result<f64, EngineError> {
    PricingModel::for_style(style, DEFAULT_STEPS).price(inputs)
}

/// Intrinsic value when `T <= EXPIRY_EPSILON`, otherwise the price from
/// `pricer`.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionKind, PricingInputs};
/// use pricer_models::pricing::{value_or_intrinsic, PricingModel};
///
/// let expired = PricingInputs::new(105.0, 100.0, 0.0, 0.05, 0.0, 0.2, OptionKind::Call);
/// assert_eq!(value_or_intrinsic(&PricingModel::default(), &expired).unwrap(), 5.0);
/// ```
pub fn value_or_intrinsic<P>(pricer: &P, inputs: &PricingInputs) -> Result<f64, P::Error>
where
    P: OptionPricer + ?Sized,
{
    if inputs.expiry <= EXPIRY_EPSILON {
        return Ok(inputs.intrinsic());
    }
    OptionPricer::price(pricer, inputs)
}
