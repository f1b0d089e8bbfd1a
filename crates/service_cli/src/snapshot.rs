//! Provider chain snapshot ingestion.
//!
//! A snapshot is a JSON document with one map per option side:
//!
//! ```json
//! {
//!   "symbol": "AAPL",
//!   "underlyingPrice": 230.10,
//!   "interestRate": 4.5,
//!   "dividendYield": 0.44,
//!   "callExpDateMap": { "2024-11-15:30": { "230.0": [ { "symbol": "...", ... } ] } },
//!   "putExpDateMap":  { ... }
//! }
//! ```
//!
//! The option kind of every record is taken from the map it sits in.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use pricer_core::types::{Greeks, OptionChain, OptionContract, OptionKind};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// expiration label -> strike label -> records
pub type ExpDateMap = BTreeMap<String, BTreeMap<String, Vec<ContractRecord>>>;

/// One contract as the provider reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    pub strike_price: f64,
    #[serde(default)]
    pub put_call: Option<String>,
    #[serde(default)]
    pub bid: f64,
    #[serde(default)]
    pub ask: f64,
    #[serde(default)]
    pub last: f64,
    #[serde(default)]
    pub mark: Option<f64>,
    #[serde(default)]
    pub delta: f64,
    #[serde(default)]
    pub gamma: f64,
    #[serde(default)]
    pub theta: f64,
    #[serde(default)]
    pub vega: f64,
    #[serde(default)]
    pub rho: f64,
    /// Implied volatility in percent
    #[serde(default)]
    pub volatility: f64,
    #[serde(default)]
    pub in_the_money: bool,
    #[serde(default)]
    pub intrinsic_value: f64,
    #[serde(default)]
    pub extrinsic_value: f64,
    #[serde(default)]
    pub days_to_expiration: Option<u32>,
}

/// A full chain snapshot for one underlying.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSnapshot {
    /// Underlying ticker
    pub symbol: String,
    /// Underlying price at snapshot time
    pub underlying_price: f64,
    /// Risk-free rate in percent
    #[serde(default)]
    pub interest_rate: f64,
    /// Dividend yield in percent
    #[serde(default)]
    pub dividend_yield: f64,
    #[serde(default)]
    pub call_exp_date_map: ExpDateMap,
    #[serde(default)]
    pub put_exp_date_map: ExpDateMap,
}

/// Splits an expiration label `YYYY-MM-DD:N` into its date and day count.
///
/// The `:N` suffix is optional.
pub fn parse_expiration_label(label: &str) -> Result<(NaiveDate, Option<u32>)> {
    let (date_part, days_part) = match label.split_once(':') {
        Some((date, days)) => (date, Some(days)),
        None => (label, None),
    };
    let date = NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Snapshot(format!("bad expiration label '{}'", label)))?;
    let days = days_part
        .map(|d| {
            d.trim()
                .parse::<u32>()
                .map_err(|_| CliError::Snapshot(format!("bad expiration label '{}'", label)))
        })
        .transpose()?;
    Ok((date, days))
}

impl ChainSnapshot {
    /// Reads a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a snapshot from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: ChainSnapshot = serde_json::from_str(content)
            .map_err(|e| CliError::Snapshot(format!("failed to parse snapshot: {}", e)))?;
        if !(snapshot.underlying_price.is_finite() && snapshot.underlying_price > 0.0) {
            return Err(CliError::Snapshot(format!(
                "underlying price must be positive, got {}",
                snapshot.underlying_price
            )));
        }
        Ok(snapshot)
    }

    /// Interest rate as a decimal.
    pub fn rate(&self) -> f64 {
        self.interest_rate / 100.0
    }

    /// Every contract in the snapshot, calls first.
    pub fn contracts(&self) -> Result<Vec<OptionContract>> {
        let mut contracts = Vec::new();
        for (kind, map) in [
            (OptionKind::Call, &self.call_exp_date_map),
            (OptionKind::Put, &self.put_exp_date_map),
        ] {
            for (label, strikes) in map {
                let (expiration, label_days) = parse_expiration_label(label)?;
                for record in strikes.values().flatten() {
                    contracts.push(self.to_contract(record, kind, expiration, label_days)?);
                }
            }
        }
        Ok(contracts)
    }

    /// Groups the snapshot into an [`OptionChain`].
    pub fn chain(&self) -> Result<OptionChain> {
        Ok(OptionChain::from_contracts(
            self.symbol.clone(),
            self.contracts()?,
        ))
    }

    fn to_contract(
        &self,
        record: &ContractRecord,
        kind: OptionKind,
        expiration: NaiveDate,
        label_days: Option<u32>,
    ) -> Result<OptionContract> {
        if let Some(reported) = &record.put_call {
            let reported: OptionKind = reported.parse()?;
            if reported != kind {
                return Err(CliError::Snapshot(format!(
                    "{} is listed as a {} but reports putCall {}",
                    record.symbol, kind, reported
                )));
            }
        }
        let days = record
            .days_to_expiration
            .or(label_days)
            .ok_or_else(|| {
                CliError::Snapshot(format!("{} has no days to expiration", record.symbol))
            })?;

        let greeks = Greeks {
            delta: record.delta,
            gamma: record.gamma,
            theta: record.theta,
            vega: record.vega,
            rho: record.rho,
        };
        let mut builder = OptionContract::builder(self.symbol.clone(), record.strike_price, kind)
            .symbol(record.symbol.clone())
            .description(record.description.clone())
            .quotes(record.bid, record.ask)
            .last(record.last)
            .implied_volatility(record.volatility)
            .greeks(greeks)
            .days_to_expiration(days)
            .expiration(expiration)
            .moneyness(
                record.in_the_money,
                record.intrinsic_value,
                record.extrinsic_value,
            );
        if let Some(mark) = record.mark {
            builder = builder.mark(mark);
        }
        Ok(builder.build())
    }
}
