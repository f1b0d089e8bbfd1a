//! Trait for models that price a single option contract.

use crate::types::PricingInputs;

/// A model that prices one option contract from its scalar inputs.
///
/// Implementations must be pure: identical inputs give identical outputs,
/// and out-of-domain inputs are reported through `Self::Error` rather than
/// clamped.
///
/// # Examples
/// ```
/// use pricer_core::traits::OptionPricer;
/// use pricer_core::types::{OptionKind, PricingInputs};
///
/// struct Intrinsic;
///
/// impl OptionPricer for Intrinsic {
///     type Error = std::convert::Infallible;
///
///     fn price(&self, inputs: &PricingInputs) -> Result<f64, Self::Error> {
///         Ok(inputs.intrinsic())
///     }
/// }
///
/// let inputs = PricingInputs::new(110.0, 100.0, 0.5, 0.05, 0.0, 0.2, OptionKind::Call);
/// assert_eq!(Intrinsic.price(&inputs).unwrap(), 10.0);
/// ```
pub trait OptionPricer {
    /// Error reported for inputs outside the model's domain.
    type Error;

    /// Price one contract (per underlying unit, no contract multiplier).
    fn price(&self, inputs: &PricingInputs) -> Result<f64, Self::Error>;
}
