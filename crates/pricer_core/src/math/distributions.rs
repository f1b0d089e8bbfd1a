//! Standard normal cumulative distribution.
//!
//! Generic over `T: Float` so the closed-form model can run in `f32` as
//! well as `f64`.

use num_traits::Float;

/// Abramowitz and Stegun 7.1.26 coefficients, a₁ through a₅.
const ERFC_COEFFS: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

/// Abramowitz and Stegun 7.1.26 scale, p.
const ERFC_SCALE: f64 = 0.327_591_1;

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½·erfc(−x/√2), with erfc from Abramowitz and Stegun 7.1.26
/// (absolute error below 1.5e-7). The tail for negative arguments is taken
/// as 2 − erfc(|z|), so Φ(x) + Φ(−x) = 1 exactly.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let c = |v: f64| T::from(v).unwrap();

    let z = -x / c(std::f64::consts::SQRT_2);
    let t = T::one() / (T::one() + c(ERFC_SCALE) * z.abs());
    let poly = ERFC_COEFFS
        .iter()
        .rev()
        .fold(T::zero(), |acc, &a| (acc + c(a)) * t);
    let tail = poly * (-z * z).exp();

    let erfc = if z < T::zero() { c(2.0) - tail } else { tail };
    c(0.5) * erfc
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841_344_746, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.158_655_254, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(1.96_f64), 0.975_002_105, epsilon = 1e-6);
    }

    #[test]
    fn test_norm_cdf_tails() {
        assert!(norm_cdf(-10.0_f64) < 1e-15);
        assert_relative_eq!(norm_cdf(10.0_f64), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_norm_cdf_f32() {
        let cdf = norm_cdf(0.5_f32);
        assert!((cdf - 0.691_462_5).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn test_norm_cdf_symmetry(x in -8.0_f64..8.0) {
            let sum = norm_cdf(x) + norm_cdf(-x);
            prop_assert!((sum - 1.0).abs() < 1e-14);
        }

        #[test]
        fn test_norm_cdf_monotone(x in -8.0_f64..8.0, dx in 1e-3_f64..1.0) {
            prop_assert!(norm_cdf(x + dx) >= norm_cdf(x));
        }
    }
}
