//! Sample statistics over price and return series.

/// Divisor convention for the variance.
///
/// - `Sample`: divide by n - 1 (unbiased estimator)
/// - `Population`: divide by n
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DegreesOfFreedom {
    /// n - 1 in the denominator
    #[default]
    Sample,
    /// n in the denominator
    Population,
}

impl DegreesOfFreedom {
    /// Observations consumed by the divisor (1 for sample, 0 for population).
    #[inline]
    pub fn ddof(&self) -> usize {
        match self {
            DegreesOfFreedom::Sample => 1,
            DegreesOfFreedom::Population => 0,
        }
    }
}

/// Arithmetic mean. `None` for an empty series.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation under the given divisor convention.
///
/// `None` when there are not more observations than `ddof`.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::{std_dev, DegreesOfFreedom};
///
/// let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert_eq!(std_dev(&xs, DegreesOfFreedom::Population), Some(2.0));
/// assert!(std_dev(&[1.0], DegreesOfFreedom::Sample).is_none());
/// ```
pub fn std_dev(values: &[f64], dof: DegreesOfFreedom) -> Option<f64> {
    let n = values.len();
    if n <= dof.ddof() {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    Some((sum_sq / (n - dof.ddof()) as f64).sqrt())
}
