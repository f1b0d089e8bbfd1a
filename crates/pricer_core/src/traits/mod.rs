//! Core traits shared by the pricing layers.
//!
//! - Generic floating-point operations (`Float` trait)
//! - Single-contract pricing (`OptionPricer` trait)
//!
//! Pricers are dispatched statically through enums in `pricer_models`;
//! the trait exists so models can be exercised uniformly in tests and
//! benchmarks.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;

pub use priceable::OptionPricer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_trait_with_f64() {
        fn generic_sqrt<T: Float>(x: T) -> T {
            x.sqrt()
        }

        assert_eq!(generic_sqrt(4.0_f64), 2.0);
    }
}
