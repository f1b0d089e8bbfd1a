//! Date and price sampling axes.

use crate::error::GridError;

/// Maximum number of entries on the date axis.
pub const MAX_DATE_POINTS: usize = 20;

/// Default number of price samples.
pub const DEFAULT_SAMPLE_COUNT: usize = 20;

/// Rounds to whole cents.
#[inline]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Day offsets from today at which the grid is evaluated.
///
/// Up to `MAX_DATE_POINTS - 1` days every day is sampled. Beyond that,
/// exactly [`MAX_DATE_POINTS`] offsets `round(i · max_dte / 19)` are taken;
/// if rounding produces duplicates the tail is padded with `max_dte`.
///
/// # Examples
/// ```
/// use pricer_strategy::grid::date_axis;
///
/// assert_eq!(date_axis(5), vec![0, 1, 2, 3, 4, 5]);
///
/// let far = date_axis(100);
/// assert_eq!(far.len(), 20);
/// assert_eq!((far[0], far[19]), (0, 100));
/// ```
pub fn date_axis(max_dte: u32) -> Vec<u32> {
    let last = (MAX_DATE_POINTS - 1) as u32;
    if max_dte <= last {
        return (0..=max_dte).collect();
    }

    let step = f64::from(max_dte) / f64::from(last);
    let mut days: Vec<u32> = (0..MAX_DATE_POINTS)
        .map(|i| ((i as f64 * step).round() as u32).min(max_dte))
        .collect();
    days.dedup();
    days.resize(MAX_DATE_POINTS, max_dte);
    days
}

/// `samples` evenly spaced prices from `lower` to `upper` inclusive,
/// rounded to cents, ascending.
///
/// # Errors
/// - `GridError::InvalidRange` unless `lower < upper` (both finite)
/// - `GridError::InvalidSampleCount` if `samples == 0`
///
/// # Examples
/// ```
/// use pricer_strategy::grid::price_axis;
///
/// assert_eq!(price_axis(90.0, 110.0, 5).unwrap(), vec![90.0, 95.0, 100.0, 105.0, 110.0]);
/// assert!(price_axis(110.0, 90.0, 5).is_err());
/// ```
pub fn price_axis(lower: f64, upper: f64, samples: usize) -> Result<Vec<f64>, GridError> {
    validate_range(lower, upper)?;
    if samples == 0 {
        return Err(GridError::InvalidSampleCount { count: samples });
    }
    if samples == 1 {
        return Ok(vec![round_cents(lower)]);
    }

    let span = upper - lower;
    let last = (samples - 1) as f64;
    Ok((0..samples)
        .map(|i| round_cents(lower + span * i as f64 / last))
        .collect())
}

/// Checks `lower < upper` with both bounds finite.
pub(crate) fn validate_range(lower: f64, upper: f64) -> Result<(), GridError> {
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(GridError::InvalidRange { lower, upper });
    }
    Ok(())
}
