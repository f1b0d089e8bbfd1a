//! Option contract snapshot records.
//!
//! An `OptionContract` is built once per snapshot from provider data and is
//! never mutated afterwards. Greeks and implied volatility are carried as
//! reported; the engine does not recompute them.

use chrono::NaiveDate;

use super::option::OptionKind;

/// Provider-reported sensitivities. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂t (per day, provider convention)
    pub theta: f64,
    /// ∂V/∂σ (per volatility point)
    pub vega: f64,
    /// ∂V/∂r
    pub rho: f64,
}

/// One listed option contract as supplied by the market data collaborator.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionContract, OptionKind};
///
/// let c = OptionContract::builder("AAPL", 230.0, OptionKind::Put)
///     .symbol("AAPL  241115P00230000")
///     .quotes(3.90, 4.05)
///     .days_to_expiration(30)
///     .build();
///
/// assert_eq!(c.ask, 4.05);
/// assert!((c.mid() - 3.975).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    /// Exchange contract symbol
    pub symbol: String,
    /// Underlying ticker
    pub underlying: String,
    /// Provider description text (display only)
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Strike price
    pub strike: f64,
    /// Call or put
    pub kind: OptionKind,
    /// Best bid
    pub bid: f64,
    /// Best ask
    pub ask: f64,
    /// Last traded price
    pub last: f64,
    /// Provider mark price
    pub mark: f64,
    /// Implied volatility in percent as reported (may exceed 100)
    pub implied_volatility: f64,
    /// Provider Greeks
    #[cfg_attr(feature = "serde", serde(default))]
    pub greeks: Greeks,
    /// Calendar days until expiration at snapshot time
    pub days_to_expiration: u32,
    /// Expiration date, when the provider reports one
    #[cfg_attr(feature = "serde", serde(default))]
    pub expiration: Option<NaiveDate>,
    /// Provider in-the-money flag
    #[cfg_attr(feature = "serde", serde(default))]
    pub in_the_money: bool,
    /// Provider intrinsic value
    #[cfg_attr(feature = "serde", serde(default))]
    pub intrinsic_value: f64,
    /// Provider extrinsic (time) value
    #[cfg_attr(feature = "serde", serde(default))]
    pub extrinsic_value: f64,
}

impl OptionContract {
    /// Starts a builder with the fields every contract needs.
    pub fn builder(
        underlying: impl Into<String>,
        strike: f64,
        kind: OptionKind,
    ) -> OptionContractBuilder {
        OptionContractBuilder::new(underlying, strike, kind)
    }

    /// Mid of bid and ask.
    #[inline]
    pub fn mid(&self) -> f64 {
        0.5 * (self.bid + self.ask)
    }

    /// Intrinsic value at the given spot.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.kind.intrinsic(spot, self.strike)
    }

    /// Is this option in the money at the given spot?
    pub fn is_itm(&self, spot: f64) -> bool {
        self.intrinsic(spot) > 0.0
    }
}

/// Builder for [`OptionContract`] with provider-neutral defaults.
#[derive(Debug, Clone)]
pub struct OptionContractBuilder {
    contract: OptionContract,
}

impl OptionContractBuilder {
    fn new(underlying: impl Into<String>, strike: f64, kind: OptionKind) -> Self {
        Self {
            contract: OptionContract {
                symbol: String::new(),
                underlying: underlying.into(),
                description: String::new(),
                strike,
                kind,
                bid: 0.0,
                ask: 0.0,
                last: 0.0,
                mark: 0.0,
                implied_volatility: 0.0,
                greeks: Greeks::default(),
                days_to_expiration: 0,
                expiration: None,
                in_the_money: false,
                intrinsic_value: 0.0,
                extrinsic_value: 0.0,
            },
        }
    }

    /// Sets the contract symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.contract.symbol = symbol.into();
        self
    }

    /// Sets the description text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.contract.description = description.into();
        self
    }

    /// Sets bid and ask; mark defaults to the mid.
    pub fn quotes(mut self, bid: f64, ask: f64) -> Self {
        self.contract.bid = bid;
        self.contract.ask = ask;
        self.contract.mark = 0.5 * (bid + ask);
        self
    }

    /// Sets the last traded price.
    pub fn last(mut self, last: f64) -> Self {
        self.contract.last = last;
        self
    }

    /// Sets the mark price.
    pub fn mark(mut self, mark: f64) -> Self {
        self.contract.mark = mark;
        self
    }

    /// Sets implied volatility in percent.
    pub fn implied_volatility(mut self, percent: f64) -> Self {
        self.contract.implied_volatility = percent;
        self
    }

    /// Sets provider Greeks.
    pub fn greeks(mut self, greeks: Greeks) -> Self {
        self.contract.greeks = greeks;
        self
    }

    /// Sets days to expiration.
    pub fn days_to_expiration(mut self, days: u32) -> Self {
        self.contract.days_to_expiration = days;
        self
    }

    /// Sets the expiration date.
    pub fn expiration(mut self, date: NaiveDate) -> Self {
        self.contract.expiration = Some(date);
        self
    }

    /// Sets provider moneyness fields.
    pub fn moneyness(mut self, in_the_money: bool, intrinsic: f64, extrinsic: f64) -> Self {
        self.contract.in_the_money = in_the_money;
        self.contract.intrinsic_value = intrinsic;
        self.contract.extrinsic_value = extrinsic;
        self
    }

    /// Finishes the contract.
    pub fn build(self) -> OptionContract {
        self.contract
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OptionContract {
        OptionContract::builder("MSFT", 420.0, OptionKind::Call)
            .symbol("MSFT  250117C00420000")
            .quotes(12.0, 12.5)
            .implied_volatility(24.0)
            .days_to_expiration(45)
            .build()
    }

    #[test]
    fn test_builder_defaults() {
        let c = sample();
        assert_eq!(c.underlying, "MSFT");
        assert_eq!(c.strike, 420.0);
        assert_eq!(c.mark, 12.25);
        assert_eq!(c.greeks, Greeks::default());
        assert!(c.expiration.is_none());
    }

    #[test]
    fn test_moneyness() {
        let c = sample();
        assert!(c.is_itm(430.0));
        assert!(!c.is_itm(410.0));
        assert_eq!(c.intrinsic(430.0), 10.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let c = sample();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"kind\":\"call\""));
        let back: OptionContract = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
