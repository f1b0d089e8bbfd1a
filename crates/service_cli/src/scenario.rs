//! Scenario files.
//!
//! A scenario names a chain snapshot and the legs to hold, by contract
//! symbol:
//!
//! ```toml
//! ticker = "AAPL"
//! snapshot = "chain.json"
//! dividend_yield = 0.44   # percent, overrides the snapshot
//! as_of = "2024-10-16T10:30:00"
//!
//! [[legs]]
//! symbol = "AAPL  241115C00230000"
//! direction = "long"
//!
//! [[legs]]
//! symbol = "AAPL  241115C00240000"
//! direction = "short"
//! style = "european"
//! volatility = 0.31
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use pricer_core::types::ExerciseStyle;
use pricer_models::volatility::dividend_yield_from_percent;
use pricer_strategy::{Direction, Leg, Strategy};
use serde::Deserialize;

use crate::error::{CliError, Result};
use crate::snapshot::ChainSnapshot;

/// One leg of a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct LegSpec {
    /// Contract symbol in the snapshot
    pub symbol: String,
    /// `long`/`buy` or `short`/`sell`
    pub direction: String,
    /// Exercise style used for valuation
    #[serde(default)]
    pub style: ExerciseStyle,
    /// Volatility override as a decimal
    #[serde(default)]
    pub volatility: Option<f64>,
    /// Dividend yield override in percent
    #[serde(default)]
    pub dividend_yield: Option<f64>,
}

/// A strategy description read from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Underlying ticker
    pub ticker: String,
    /// Chain snapshot path, relative to the scenario file
    pub snapshot: PathBuf,
    /// Spot override; the snapshot's underlying price otherwise
    #[serde(default)]
    pub spot: Option<f64>,
    /// Risk-free rate override as a decimal
    #[serde(default)]
    pub rate: Option<f64>,
    /// Default dividend yield in percent
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    /// Valuation instant; the local clock otherwise
    #[serde(default)]
    pub as_of: Option<NaiveDateTime>,
    /// Lower bound of the grid price axis
    #[serde(default)]
    pub price_lower: Option<f64>,
    /// Upper bound of the grid price axis
    #[serde(default)]
    pub price_upper: Option<f64>,
    /// Positions to hold
    #[serde(default)]
    pub legs: Vec<LegSpec>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Scenario {
    /// Reads a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut scenario = Self::from_toml(&content)?;
        scenario.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(scenario)
    }

    /// Parses a scenario from TOML text. Relative snapshot paths resolve
    /// against the working directory.
    pub fn from_toml(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)
            .map_err(|e| CliError::Scenario(format!("failed to parse scenario: {}", e)))?;
        if let (Some(lower), Some(upper)) = (scenario.price_lower, scenario.price_upper) {
            if lower >= upper {
                return Err(CliError::Scenario(format!(
                    "price_lower {} must be below price_upper {}",
                    lower, upper
                )));
            }
        }
        Ok(scenario)
    }

    /// Resolved snapshot path.
    pub fn snapshot_path(&self) -> PathBuf {
        if self.snapshot.is_absolute() {
            self.snapshot.clone()
        } else {
            self.base_dir.join(&self.snapshot)
        }
    }

    /// Reads the referenced snapshot.
    pub fn load_snapshot(&self) -> Result<ChainSnapshot> {
        ChainSnapshot::load(&self.snapshot_path())
    }

    /// Valuation instant.
    pub fn as_of(&self) -> NaiveDateTime {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    /// Explicit grid price bounds, when both are given.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.price_lower.zip(self.price_upper)
    }

    /// Builds the strategy from a loaded snapshot.
    pub fn build_strategy(&self, snapshot: &ChainSnapshot) -> Result<Strategy> {
        if !snapshot.symbol.eq_ignore_ascii_case(&self.ticker) {
            return Err(CliError::Scenario(format!(
                "scenario ticker {} does not match snapshot {}",
                self.ticker, snapshot.symbol
            )));
        }
        let spot = self.spot.unwrap_or(snapshot.underlying_price);
        if !(spot.is_finite() && spot > 0.0) {
            return Err(CliError::Scenario(format!("spot must be positive, got {}", spot)));
        }
        let rate = self.rate.unwrap_or_else(|| snapshot.rate());
        let dividend_yield =
            dividend_yield_from_percent(self.dividend_yield.unwrap_or(snapshot.dividend_yield));

        let chain = snapshot.chain()?;
        let mut strategy =
            Strategy::new(snapshot.symbol.clone(), spot, rate).with_dividend_yield(dividend_yield);

        for spec in &self.legs {
            let contract = chain.find_symbol(&spec.symbol).ok_or_else(|| {
                CliError::Scenario(format!("contract {} not in snapshot", spec.symbol))
            })?;
            let direction: Direction = spec.direction.parse()?;
            let leg_yield = spec
                .dividend_yield
                .map(dividend_yield_from_percent)
                .unwrap_or(dividend_yield);

            let mut leg = Leg::new(contract.clone(), direction)?
                .with_dividend_yield(leg_yield)
                .with_exercise_style(spec.style);
            if let Some(volatility) = spec.volatility {
                leg = leg.with_volatility(volatility);
            }
            strategy.push_leg(leg)?;
        }

        tracing::info!(
            ticker = %strategy.ticker(),
            legs = strategy.len(),
            cost_basis = strategy.cost_basis(),
            "Strategy loaded"
        );
        Ok(strategy)
    }

    /// Loads the snapshot and builds the strategy.
    pub fn strategy(&self) -> Result<Strategy> {
        let snapshot = self.load_snapshot()?;
        self.build_strategy(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::tests::SAMPLE;
    use approx::assert_relative_eq;

    const SCENARIO: &str = r#"
        ticker = "AAPL"
        snapshot = "chain.json"
        as_of = "2024-10-16T10:30:00"

        [[legs]]
        symbol = "AAPL  241115C00100000"
        direction = "buy"

        [[legs]]
        symbol = "AAPL  241115C00110000"
        direction = "short"
        style = "european"
        volatility = 0.3
    "#;

    #[test]
    fn test_build_strategy() {
        let scenario = Scenario::from_toml(SCENARIO).unwrap();
        let snapshot = ChainSnapshot::from_json(SAMPLE).unwrap();
        let strategy = scenario.build_strategy(&snapshot).unwrap();

        assert_eq!(strategy.len(), 2);
        assert_eq!(strategy.spot(), 100.0);
        assert_relative_eq!(strategy.rate(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(strategy.dividend_yield(), 0.01, epsilon = 1e-12);
        // long at 4.2 ask, short at 1.1 ask
        assert_relative_eq!(strategy.cost_basis(), 310.0, epsilon = 1e-9);

        let short = &strategy.legs()[1];
        assert_eq!(short.direction(), Direction::Short);
        assert_eq!(short.exercise_style(), ExerciseStyle::European);
        assert_eq!(short.volatility(), 0.3);
    }

    #[test]
    fn test_overrides() {
        let toml = format!("spot = 104.0\nrate = 0.02\ndividend_yield = 0.0\n{}", SCENARIO);
        let scenario = Scenario::from_toml(&toml).unwrap();
        let snapshot = ChainSnapshot::from_json(SAMPLE).unwrap();
        let strategy = scenario.build_strategy(&snapshot).unwrap();
        assert_eq!(strategy.spot(), 104.0);
        assert_eq!(strategy.rate(), 0.02);
        assert_eq!(strategy.dividend_yield(), 0.0);
    }

    #[test]
    fn test_unknown_symbol() {
        let toml = SCENARIO.replace("241115C00110000", "241115C00999000");
        let scenario = Scenario::from_toml(&toml).unwrap();
        let snapshot = ChainSnapshot::from_json(SAMPLE).unwrap();
        assert!(matches!(
            scenario.build_strategy(&snapshot),
            Err(CliError::Scenario(_))
        ));
    }

    #[test]
    fn test_unknown_direction() {
        let toml = SCENARIO.replace("\"buy\"", "\"hold\"");
        let scenario = Scenario::from_toml(&toml).unwrap();
        let snapshot = ChainSnapshot::from_json(SAMPLE).unwrap();
        assert!(matches!(
            scenario.build_strategy(&snapshot),
            Err(CliError::Engine(_))
        ));
    }

    #[test]
    fn test_ticker_mismatch() {
        let toml = SCENARIO.replace("ticker = \"AAPL\"", "ticker = \"MSFT\"");
        let scenario = Scenario::from_toml(&toml).unwrap();
        let snapshot = ChainSnapshot::from_json(SAMPLE).unwrap();
        assert!(matches!(
            scenario.build_strategy(&snapshot),
            Err(CliError::Scenario(_))
        ));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let toml = format!("price_lower = 110.0\nprice_upper = 90.0\n{}", SCENARIO);
        assert!(Scenario::from_toml(&toml).is_err());
    }

    #[test]
    fn test_snapshot_resolves_next_to_scenario() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chain.json"), SAMPLE).unwrap();
        let path = dir.path().join("spread.toml");
        std::fs::write(&path, SCENARIO).unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.snapshot_path(), dir.path().join("chain.json"));
        assert_eq!(scenario.strategy().unwrap().len(), 2);
    }
}
