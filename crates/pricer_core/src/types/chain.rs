//! Option chain grouped by expiration.
//!
//! Groups one snapshot's contracts by days-to-expiration into calls and puts,
//! each side kept sorted by strike.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::contract::OptionContract;
use super::option::OptionKind;

/// Strike tolerance when looking a contract up by strike.
const STRIKE_TOLERANCE: f64 = 1e-6;

/// Calls and puts sharing one expiration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpirationSlice {
    /// Expiration date, when known
    pub expiration: Option<NaiveDate>,
    /// Calls sorted by strike
    pub calls: Vec<OptionContract>,
    /// Puts sorted by strike
    pub puts: Vec<OptionContract>,
}

impl ExpirationSlice {
    /// Contracts of one kind.
    pub fn side(&self, kind: OptionKind) -> &[OptionContract] {
        match kind {
            OptionKind::Call => &self.calls,
            OptionKind::Put => &self.puts,
        }
    }

    fn side_mut(&mut self, kind: OptionKind) -> &mut Vec<OptionContract> {
        match kind {
            OptionKind::Call => &mut self.calls,
            OptionKind::Put => &mut self.puts,
        }
    }
}

/// One underlying's option chain.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionChain, OptionContract, OptionKind};
///
/// let mut chain = OptionChain::new("AAPL");
/// chain.insert(OptionContract::builder("AAPL", 235.0, OptionKind::Call).days_to_expiration(7).build());
/// chain.insert(OptionContract::builder("AAPL", 230.0, OptionKind::Call).days_to_expiration(7).build());
/// chain.insert(OptionContract::builder("AAPL", 230.0, OptionKind::Put).days_to_expiration(35).build());
///
/// assert_eq!(chain.expirations(), vec![7, 35]);
/// let strikes: Vec<f64> = chain.slice(7).unwrap().calls.iter().map(|c| c.strike).collect();
/// assert_eq!(strikes, vec![230.0, 235.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionChain {
    /// Underlying ticker
    pub underlying: String,
    slices: BTreeMap<u32, ExpirationSlice>,
}

impl OptionChain {
    /// Creates an empty chain.
    pub fn new(underlying: impl Into<String>) -> Self {
        Self {
            underlying: underlying.into(),
            slices: BTreeMap::new(),
        }
    }

    /// Builds a chain from a batch of contracts.
    pub fn from_contracts(
        underlying: impl Into<String>,
        contracts: impl IntoIterator<Item = OptionContract>,
    ) -> Self {
        let mut chain = Self::new(underlying);
        for contract in contracts {
            chain.insert(contract);
        }
        chain
    }

    /// Inserts a contract, keeping its side sorted by strike.
    pub fn insert(&mut self, contract: OptionContract) {
        let slice = self.slices.entry(contract.days_to_expiration).or_default();
        if slice.expiration.is_none() {
            slice.expiration = contract.expiration;
        }
        let side = slice.side_mut(contract.kind);
        let at = side.partition_point(|c| c.strike <= contract.strike);
        side.insert(at, contract);
    }

    /// Days-to-expiration of every slice, ascending.
    pub fn expirations(&self) -> Vec<u32> {
        self.slices.keys().copied().collect()
    }

    /// The slice for one expiration.
    pub fn slice(&self, days_to_expiration: u32) -> Option<&ExpirationSlice> {
        self.slices.get(&days_to_expiration)
    }

    /// Finds a contract by exchange symbol.
    pub fn find_symbol(&self, symbol: &str) -> Option<&OptionContract> {
        self.iter().find(|c| c.symbol == symbol)
    }

    /// Finds a contract by expiration, strike and kind.
    pub fn find(
        &self,
        days_to_expiration: u32,
        strike: f64,
        kind: OptionKind,
    ) -> Option<&OptionContract> {
        self.slice(days_to_expiration)?
            .side(kind)
            .iter()
            .find(|c| (c.strike - strike).abs() < STRIKE_TOLERANCE)
    }

    /// All contracts, by expiration then calls before puts.
    pub fn iter(&self) -> impl Iterator<Item = &OptionContract> {
        self.slices
            .values()
            .flat_map(|s| s.calls.iter().chain(s.puts.iter()))
    }

    /// Number of contracts.
    pub fn len(&self) -> usize {
        self.slices
            .values()
            .map(|s| s.calls.len() + s.puts.len())
            .sum()
    }

    /// Returns whether the chain holds no contracts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
