//! Time conventions for valuation.
//!
//! This module provides:
//! - The market-close time of day used for every evaluation date after today
//! - Expiry instants derived from a snapshot date and days-to-expiration
//! - Act/365 year fractions between two instants, to the second
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use pricer_core::types::time::{market_close_on, year_fraction};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
//!
//! let t = year_fraction(market_close_on(today), market_close_on(expiry));
//! assert!((t - 1.0).abs() < 1e-12);
//! ```

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Hour of the regular-session close (16:00 exchange time).
pub const MARKET_CLOSE_HOUR: u32 = 16;

/// Days per year for the Act/365 convention.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Seconds per Act/365 year.
pub const SECONDS_PER_YEAR: f64 = DAYS_PER_YEAR * 86_400.0;

/// Remaining time (in years) at or below which a contract is treated as
/// expired and valued at intrinsic: 1/365 of a day.
pub const EXPIRY_EPSILON: f64 = 1.0 / (DAYS_PER_YEAR * DAYS_PER_YEAR);

/// Regular-session close as a time of day.
#[inline]
pub fn market_close() -> NaiveTime {
    NaiveTime::from_hms_opt(MARKET_CLOSE_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// The close instant of the given date.
#[inline]
pub fn market_close_on(date: NaiveDate) -> NaiveDateTime {
    date.and_time(market_close())
}

/// Instant of a close at a custom time of day.
#[inline]
pub fn close_at(date: NaiveDate, close: NaiveTime) -> NaiveDateTime {
    date.and_time(close)
}

/// Date `days` calendar days after `date`, saturating at the calendar end.
#[inline]
pub fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Expiry instant of a contract listed `days_to_expiration` days after `as_of`.
///
/// Contracts expire at the close of their expiration date.
pub fn expiry_instant(as_of: NaiveDate, days_to_expiration: u32, close: NaiveTime) -> NaiveDateTime {
    close_at(add_days(as_of, days_to_expiration), close)
}

/// Act/365 year fraction from `start` to `end`, to the second.
///
/// Negative when `end` precedes `start`.
#[inline]
pub fn year_fraction(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / SECONDS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_market_close_is_four_pm() {
        let close = market_close_on(date(2024, 6, 14));
        assert_eq!(close.time(), NaiveTime::from_hms_opt(16, 0, 0).unwrap());
    }

    #[test]
    fn test_year_fraction_one_day() {
        let start = market_close_on(date(2024, 6, 14));
        let end = market_close_on(date(2024, 6, 15));
        assert_relative_eq!(year_fraction(start, end), 1.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_year_fraction_negative_when_reversed() {
        let start = market_close_on(date(2024, 6, 15));
        let end = market_close_on(date(2024, 6, 14));
        assert!(year_fraction(start, end) < 0.0);
    }

    #[test]
    fn test_intraday_fraction() {
        let morning = date(2024, 6, 14).and_hms_opt(10, 0, 0).unwrap();
        let close = market_close_on(date(2024, 6, 14));
        assert_relative_eq!(
            year_fraction(morning, close),
            6.0 / 24.0 / 365.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_expiry_instant() {
        let expiry = expiry_instant(date(2024, 12, 30), 3, market_close());
        assert_eq!(expiry, market_close_on(date(2025, 1, 2)));
    }

    #[test]
    fn test_epsilon_is_a_fraction_of_a_day() {
        assert!(EXPIRY_EPSILON < 1.0 / DAYS_PER_YEAR);
        assert!(EXPIRY_EPSILON > 0.0);
    }
}
