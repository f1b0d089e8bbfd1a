//! Volatility command implementation
//!
//! Estimates annualised historical volatility from a file of closing prices.

use std::path::Path;

use pricer_core::math::statistics::DegreesOfFreedom;
use pricer_models::VolatilityEstimator;
use serde::Serialize;
use tracing::info;

use crate::output::{boxed_table, to_json, OutputFormat};
use crate::{CliError, Result};

#[derive(Debug, Serialize)]
struct VolatilityReport {
    observations: usize,
    trading_days: f64,
    convention: &'static str,
    volatility: f64,
}

/// Reads closing prices, oldest first.
///
/// Accepts a JSON array or numbers separated by whitespace, commas or
/// newlines. A non-numeric first token is taken as a column header.
pub fn parse_prices(content: &str) -> Result<Vec<f64>> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut prices = Vec::new();
    let tokens = trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());
    for (i, token) in tokens.enumerate() {
        match token.parse::<f64>() {
            Ok(price) => prices.push(price),
            Err(_) if i == 0 => continue,
            Err(_) => {
                return Err(CliError::InvalidArgument(format!(
                    "not a price: '{}'",
                    token
                )))
            }
        }
    }
    Ok(prices)
}

/// Run the volatility command
pub fn run(prices_path: &Path, population: bool, trading_days: f64, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    if !prices_path.exists() {
        return Err(CliError::FileNotFound(prices_path.display().to_string()));
    }
    if !(trading_days.is_finite() && trading_days > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "trading days must be positive, got {}",
            trading_days
        )));
    }

    let prices = parse_prices(&std::fs::read_to_string(prices_path)?)?;
    info!("Estimating volatility from {} prices", prices.len());

    let dof = if population {
        DegreesOfFreedom::Population
    } else {
        DegreesOfFreedom::Sample
    };
    let volatility = VolatilityEstimator::new(trading_days, dof).estimate(&prices)?;

    let report = VolatilityReport {
        observations: prices.len(),
        trading_days,
        convention: if population { "population" } else { "sample" },
        volatility,
    };
    let rendered = match format {
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Table => boxed_table(
            &["observations".to_string(), "volatility".to_string()],
            &[vec![
                report.observations.to_string(),
                format!("{:.4} ({})", report.volatility, report.convention),
            ]],
        ),
    };
    println!("{}", rendered);
    Ok(())
}
