//! Provider-reported implied volatility and dividend yield.
//!
//! Providers quote both as percentages. Implied volatility at or above
//! 200% is treated as a reporting anomaly and replaced by the ceiling.

/// Decimal implied volatility substituted for anomalous quotes (200%).
pub const IMPLIED_VOLATILITY_CEILING: f64 = 2.0;

/// Converts a percentage implied volatility to a decimal, capping at
/// [`IMPLIED_VOLATILITY_CEILING`].
///
/// Values below the ceiling are passed through unchanged (÷100); a zero or
/// negative quote is left for the pricing model to reject.
///
/// # Examples
/// ```
/// use pricer_models::volatility::cap_implied_volatility;
///
/// assert_eq!(cap_implied_volatility(35.0), 0.35);
/// assert_eq!(cap_implied_volatility(200.0), 2.0);
/// assert_eq!(cap_implied_volatility(950.0), 2.0);
/// ```
pub fn cap_implied_volatility(percent: f64) -> f64 {
    let ceiling_percent = IMPLIED_VOLATILITY_CEILING * 100.0;
    if percent >= ceiling_percent {
        tracing::warn!(
            reported = percent,
            capped = IMPLIED_VOLATILITY_CEILING,
            "implied volatility at or above ceiling, capping"
        );
        return IMPLIED_VOLATILITY_CEILING;
    }
    percent / 100.0
}

/// Converts a percentage dividend yield to a decimal rate.
pub fn dividend_yield_from_percent(percent: f64) -> f64 {
    percent / 100.0
}
