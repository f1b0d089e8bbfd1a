//! Payoff command implementation
//!
//! Evaluates a scenario's profit at expiration over a price axis.

use std::path::Path;

use pricer_strategy::grid::price_axis;
use pricer_strategy::{PayoffCurve, Strategy};
use serde::Serialize;
use tracing::info;

use crate::config::EngineSettings;
use crate::output::{boxed_table, to_json, OutputFormat};
use crate::scenario::Scenario;
use crate::{CliError, Result};

/// Rows shown in the table view.
const TABLE_ROWS: usize = 25;

/// Command-line overrides for the payoff axis.
#[derive(Debug, Clone, Default)]
pub struct PayoffOptions {
    /// Lower price bound
    pub lower: Option<f64>,
    /// Upper price bound
    pub upper: Option<f64>,
    /// Axis sample count
    pub samples: Option<usize>,
}

#[derive(Serialize)]
struct PayoffReport<'a> {
    ticker: &'a str,
    cost_basis: f64,
    max_profit: Option<f64>,
    max_loss: Option<f64>,
    breakevens: Vec<f64>,
    curve: &'a PayoffCurve,
}

/// Evaluates the payoff curve over the requested or default axis.
pub fn build(
    strategy: &Strategy,
    settings: &EngineSettings,
    options: &PayoffOptions,
) -> Result<PayoffCurve> {
    let samples = options.samples.unwrap_or(settings.payoff_samples);
    match (options.lower, options.upper) {
        (Some(lower), Some(upper)) => {
            let prices = price_axis(lower, upper, samples)?;
            Ok(PayoffCurve::new(strategy, prices))
        }
        (None, None) => Ok(PayoffCurve::with_default_axis(strategy, samples)?),
        _ => Err(CliError::InvalidArgument(
            "--lower and --upper must be given together".to_string(),
        )),
    }
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Renders a payoff curve in the requested format.
pub fn render(strategy: &Strategy, curve: &PayoffCurve, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&PayoffReport {
            ticker: strategy.ticker(),
            cost_basis: strategy.cost_basis(),
            max_profit: curve.max_profit(),
            max_loss: curve.max_loss(),
            breakevens: curve.breakevens(),
            curve,
        }),
        OutputFormat::Table => {
            let breakevens: Vec<String> = curve
                .breakevens()
                .iter()
                .map(|p| format!("{:.2}", p))
                .collect();
            let mut out = format!(
                "{}  cost basis {:.2}\nmax profit {}  max loss {}\nbreakevens: {}\n",
                strategy.ticker(),
                strategy.cost_basis(),
                money(curve.max_profit()),
                money(curve.max_loss()),
                if breakevens.is_empty() {
                    "none".to_string()
                } else {
                    breakevens.join(", ")
                }
            );

            let stride = curve.prices.len().div_ceil(TABLE_ROWS).max(1);
            let rows: Vec<Vec<String>> = curve
                .prices
                .iter()
                .zip(&curve.profit)
                .step_by(stride)
                .map(|(p, v)| vec![format!("{:.2}", p), format!("{:.2}", v)])
                .collect();
            out.push_str(&boxed_table(
                &["price".to_string(), "profit".to_string()],
                &rows,
            ));
            Ok(out)
        }
    }
}

/// Run the payoff command
pub fn run(
    scenario_path: &Path,
    settings: &EngineSettings,
    options: &PayoffOptions,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    info!("Computing payoff curve...");
    info!("  Scenario: {}", scenario_path.display());

    let scenario = Scenario::load(scenario_path)?;
    let strategy = scenario.strategy()?;
    let curve = build(&strategy, settings, options)?;

    println!("{}", render(&strategy, &curve, format)?);
    Ok(())
}
